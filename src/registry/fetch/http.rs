//! HTTP template index fetching.
//!
//! Performs a single GET per repository, with no caching and no retries.

use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde_json::Value;
use std::time::Duration;

use super::TemplateFetcher;
use crate::error::{Result, TemplarError};
use crate::registry::template::{TemplateRecord, TemplateSummary};
use crate::repository::RepositoryDescriptor;

/// Request timeout used when none is configured.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches template indexes over HTTP/HTTPS.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with the default 30-second timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
    }

    /// Create a new HTTP fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("templar/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self { client, timeout })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Parse a repository URL, rejecting blanks and relative or host-less URLs.
pub fn parse_repository_url(repository: &RepositoryDescriptor) -> Result<Url> {
    if !repository.has_url() {
        return Err(TemplarError::MissingUrl {
            repo: repository.description.clone(),
        });
    }

    let url = Url::parse(repository.url.trim()).map_err(|e| TemplarError::InvalidUrl {
        url: repository.url.clone(),
        message: e.to_string(),
    })?;

    if !url.has_host() {
        return Err(TemplarError::InvalidUrl {
            url: repository.url.clone(),
            message: "URL has no host".to_string(),
        });
    }

    Ok(url)
}

/// Turn an index body into template records.
pub fn parse_template_index(url: &str, body: &str) -> Result<Vec<TemplateRecord>> {
    let value: Value = serde_json::from_str(body).map_err(|_| TemplarError::NotJson {
        url: url.to_string(),
    })?;

    let summaries: Vec<TemplateSummary> =
        serde_json::from_value(value).map_err(|e| TemplarError::InvalidIndex {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    Ok(summaries.into_iter().map(TemplateRecord::from).collect())
}

impl TemplateFetcher for HttpFetcher {
    fn fetch_templates(&self, repository: &RepositoryDescriptor) -> Result<Vec<TemplateRecord>> {
        let url = parse_repository_url(repository)?;
        let url_str = url.to_string();

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| TemplarError::Http {
                url: url_str.clone(),
                source,
            })?;

        if response.status() != StatusCode::OK {
            return Err(TemplarError::UnexpectedStatus {
                repo: repository.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().map_err(|source| TemplarError::Http {
            url: url_str.clone(),
            source,
        })?;

        tracing::debug!("Fetched template index from {}", url_str);
        parse_template_index(&url_str, &body)
    }
}
