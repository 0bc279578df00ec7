//! Registry settings.
//!
//! Settings are read from `.config/templar.yml` in the workspace. The file
//! is optional; every field has a default.
//!
//! ```yaml
//! fetch_timeout_secs: 10
//! default_repositories:
//!   - url: https://example.com/templates/index.json
//!     description: Team templates
//! extensions:
//!   - name: appsody
//!     description: Appsody stacks
//!     repositories:
//!       - url: https://example.com/stacks/index.json
//!   - name: local
//!     file: repositories.json
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use super::paths::ConfigPaths;
use crate::error::{Result, TemplarError};
use crate::extension::{
    JsonFileRepositoryProvider, StaticRepositoryProvider, TemplateRepositoryProvider,
};
use crate::registry::fetch::DEFAULT_FETCH_TIMEOUT;
use crate::repository::{default_repositories, RepositoryDescriptor};

/// Overrides `fetch_timeout_secs`.
pub const FETCH_TIMEOUT_ENV: &str = "TEMPLAR_FETCH_TIMEOUT_SECS";

/// Settings for a workspace's registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    /// Per-request timeout for repository fetches.
    pub fetch_timeout_secs: Option<u64>,

    /// Seed list written when no repository list exists yet.
    pub default_repositories: Option<Vec<RepositoryDescriptor>>,

    /// Extensions registered at startup.
    pub extensions: Vec<ExtensionConfig>,
}

/// An extension declared in settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    pub name: String,

    pub description: Option<String>,

    /// Fixed repositories to provide.
    pub repositories: Vec<RepositoryDescriptor>,

    /// JSON file to read repositories from, relative to the workspace.
    /// Takes precedence over `repositories`.
    pub file: Option<PathBuf>,
}

impl ExtensionConfig {
    /// Build the provider described by this entry.
    pub fn provider(&self, workspace: &Path) -> Arc<dyn TemplateRepositoryProvider> {
        match &self.file {
            Some(file) => {
                let mut provider = JsonFileRepositoryProvider::new(workspace.join(file));
                if let Some(description) = &self.description {
                    provider = provider.with_description(description.clone());
                }
                Arc::new(provider)
            }
            None => {
                let mut provider = StaticRepositoryProvider::new(self.repositories.clone());
                if let Some(description) = &self.description {
                    provider = provider.with_description(description.clone());
                }
                Arc::new(provider)
            }
        }
    }
}

impl RegistrySettings {
    /// Effective fetch timeout.
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_FETCH_TIMEOUT)
    }

    /// Repositories to seed a fresh workspace with.
    pub fn seed_repositories(&self) -> Vec<RepositoryDescriptor> {
        self.default_repositories
            .clone()
            .unwrap_or_else(default_repositories)
    }

    /// Apply environment overrides from `vars`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_env_overrides(&mut self, vars: &HashMap<String, String>) {
        if let Some(raw) = vars.get(FETCH_TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.fetch_timeout_secs = Some(secs),
                Err(_) => tracing::warn!(
                    "Ignoring {}={}: expected a number of seconds",
                    FETCH_TIMEOUT_ENV,
                    raw
                ),
            }
        }
    }
}

/// Parse settings YAML.
///
/// An empty document yields the defaults.
pub fn parse_settings(content: &str, source_path: &Path) -> Result<RegistrySettings> {
    if content.trim().is_empty() {
        return Ok(RegistrySettings::default());
    }
    serde_yaml::from_str(content).map_err(|e| TemplarError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the settings file of a workspace, if present.
pub fn load_settings_file(paths: &ConfigPaths) -> Result<RegistrySettings> {
    let path = paths.settings_file();
    match fs::read_to_string(&path) {
        Ok(content) => parse_settings(&content, &path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(RegistrySettings::default()),
        Err(e) => Err(TemplarError::Io(e)),
    }
}

/// Load settings for a workspace with overrides from the process environment.
pub fn load_settings(paths: &ConfigPaths) -> Result<RegistrySettings> {
    let mut settings = load_settings_file(paths)?;
    let vars: HashMap<String, String> = std::env::vars().collect();
    settings.apply_env_overrides(&vars);
    Ok(settings)
}
