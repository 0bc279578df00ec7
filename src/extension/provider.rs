//! The repository provider capability and built-in providers.

use anyhow::{bail, Context};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

use crate::repository::RepositoryDescriptor;

/// Something that can list template repositories on demand.
///
/// Errors are never fatal to a refresh: the registry logs them and the
/// extension contributes nothing for that call.
pub trait TemplateRepositoryProvider: Send + Sync {
    /// List the repositories this extension currently provides.
    fn list_repositories(&self) -> anyhow::Result<Vec<RepositoryDescriptor>>;

    /// Human-readable description; the extension name is used when absent.
    fn description(&self) -> Option<&str> {
        None
    }
}

impl<F> TemplateRepositoryProvider for F
where
    F: Fn() -> anyhow::Result<Vec<RepositoryDescriptor>> + Send + Sync,
{
    fn list_repositories(&self) -> anyhow::Result<Vec<RepositoryDescriptor>> {
        self()
    }
}

/// Validate an untyped repository payload.
///
/// The payload must be an array. Elements that are not objects with a
/// non-blank string `url` are dropped.
pub fn parse_provided_repositories(value: Value) -> anyhow::Result<Vec<RepositoryDescriptor>> {
    let items = match value {
        Value::Array(items) => items,
        other => bail!(
            "extension should provide an array of repositories, but instead provided '{}'",
            other
        ),
    };

    Ok(items
        .into_iter()
        .filter(|item| {
            item.get("url")
                .and_then(Value::as_str)
                .is_some_and(|url| !url.trim().is_empty())
        })
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Provides a fixed list of repositories.
#[derive(Debug, Clone, Default)]
pub struct StaticRepositoryProvider {
    description: Option<String>,
    repositories: Vec<RepositoryDescriptor>,
}

impl StaticRepositoryProvider {
    /// Create a provider for the given repositories.
    pub fn new(repositories: Vec<RepositoryDescriptor>) -> Self {
        Self {
            description: None,
            repositories,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl TemplateRepositoryProvider for StaticRepositoryProvider {
    fn list_repositories(&self) -> anyhow::Result<Vec<RepositoryDescriptor>> {
        Ok(self.repositories.clone())
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Reads repositories from a JSON file each time it is asked.
#[derive(Debug, Clone)]
pub struct JsonFileRepositoryProvider {
    path: PathBuf,
    description: Option<String>,
}

impl JsonFileRepositoryProvider {
    /// Create a provider backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            description: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl TemplateRepositoryProvider for JsonFileRepositoryProvider {
    fn list_repositories(&self) -> anyhow::Result<Vec<RepositoryDescriptor>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read repositories from {:?}", self.path))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("{:?} does not contain JSON", self.path))?;
        parse_provided_repositories(value)
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
