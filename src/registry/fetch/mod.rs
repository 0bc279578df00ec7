//! Template index fetching.
//!
//! The registry reaches remote repositories through the [`TemplateFetcher`]
//! trait; [`HttpFetcher`] is the production implementation.

pub mod http;

pub use http::{HttpFetcher, DEFAULT_FETCH_TIMEOUT};

use crate::error::Result;
use crate::registry::template::TemplateRecord;
use crate::repository::RepositoryDescriptor;

/// Fetches and normalizes the templates of one repository.
pub trait TemplateFetcher: Send + Sync {
    /// Fetch the repository's index, preserving the index order.
    fn fetch_templates(&self, repository: &RepositoryDescriptor) -> Result<Vec<TemplateRecord>>;
}
