//! Template repository descriptors.
//!
//! A repository is a remote URL serving a JSON index of templates. The
//! [`RepositoryList`] keeps them in insertion order, keyed by exact URL.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TemplarError};

/// URL of the repository seeded into a fresh workspace.
pub const DEFAULT_REPOSITORY_URL: &str =
    "https://raw.githubusercontent.com/kabanero-io/codewind-templates/master/devfiles/index.json";

/// Description of the seeded repository.
pub const DEFAULT_REPOSITORY_DESCRIPTION: &str = "Standard Codewind templates.";

/// A known template repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    /// Index URL (unique key)
    pub url: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Whether the repository contributes to enabled-only listings
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl RepositoryDescriptor {
    /// Create an enabled repository.
    pub fn new(url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: description.into(),
            enabled: true,
        }
    }

    /// Set the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Whether this descriptor carries a usable URL.
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

/// The repositories a fresh workspace starts with.
pub fn default_repositories() -> Vec<RepositoryDescriptor> {
    vec![RepositoryDescriptor::new(
        DEFAULT_REPOSITORY_URL,
        DEFAULT_REPOSITORY_DESCRIPTION,
    )]
}

/// Ordered set of repositories keyed by URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryList {
    repositories: Vec<RepositoryDescriptor>,
}

impl RepositoryList {
    /// Create a list from descriptors, keeping their order.
    pub fn new(repositories: Vec<RepositoryDescriptor>) -> Self {
        Self { repositories }
    }

    /// All repositories in order.
    pub fn all(&self) -> &[RepositoryDescriptor] {
        &self.repositories
    }

    /// Only the enabled repositories, in order.
    pub fn enabled(&self) -> Vec<RepositoryDescriptor> {
        self.repositories
            .iter()
            .filter(|r| r.enabled)
            .cloned()
            .collect()
    }

    /// Number of repositories.
    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    /// Whether a repository with this exact URL exists.
    pub fn contains(&self, url: &str) -> bool {
        self.repositories.iter().any(|r| r.url == url)
    }

    /// Look up a repository by exact URL.
    pub fn get(&self, url: &str) -> Option<&RepositoryDescriptor> {
        self.repositories.iter().find(|r| r.url == url)
    }

    /// Append a new enabled repository.
    ///
    /// Fails with [`TemplarError::DuplicateUrl`] and leaves the list untouched
    /// when the URL is already present.
    pub fn add(&mut self, url: &str, description: &str) -> Result<()> {
        if self.contains(url) {
            return Err(TemplarError::DuplicateUrl {
                url: url.to_string(),
            });
        }
        self.repositories
            .push(RepositoryDescriptor::new(url, description));
        Ok(())
    }

    /// Remove every repository with this URL. Returns how many were removed.
    pub fn remove(&mut self, url: &str) -> usize {
        let before = self.repositories.len();
        self.repositories.retain(|r| r.url != url);
        before - self.repositories.len()
    }

    /// Set the enabled flag of the first repository with this URL.
    pub fn set_enabled(&mut self, url: &str, enabled: bool) -> Result<()> {
        let repo = self
            .repositories
            .iter_mut()
            .find(|r| r.url == url)
            .ok_or_else(|| TemplarError::RepositoryNotFound {
                url: url.to_string(),
            })?;
        repo.enabled = enabled;
        Ok(())
    }
}

impl From<Vec<RepositoryDescriptor>> for RepositoryList {
    fn from(repositories: Vec<RepositoryDescriptor>) -> Self {
        Self::new(repositories)
    }
}
