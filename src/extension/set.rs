//! Registered extensions and their enabled state.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::provider::TemplateRepositoryProvider;
use crate::error::{Result, TemplarError};
use crate::repository::RepositoryDescriptor;

/// Persisted view of an extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionDescriptor {
    /// Registration name (unique key)
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Whether the extension's repositories are included
    pub enabled: bool,
}

/// A registered extension.
#[derive(Clone)]
pub struct Extension {
    name: String,
    provider: Arc<dyn TemplateRepositoryProvider>,
    enabled: bool,
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension")
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl Extension {
    /// Create an enabled extension.
    pub fn new(name: impl Into<String>, provider: Arc<dyn TemplateRepositoryProvider>) -> Self {
        Self {
            name: name.into(),
            provider,
            enabled: true,
        }
    }

    /// Registration name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the extension is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The provider behind this extension.
    pub fn provider(&self) -> &dyn TemplateRepositoryProvider {
        self.provider.as_ref()
    }

    /// Describe this extension for listing and persistence.
    pub fn descriptor(&self) -> ExtensionDescriptor {
        let description = self
            .provider
            .description()
            .filter(|d| !d.is_empty())
            .unwrap_or(self.name.as_str())
            .to_string();

        ExtensionDescriptor {
            name: self.name.clone(),
            description,
            enabled: self.enabled,
        }
    }
}

/// The set of registered extensions, in registration order.
#[derive(Debug, Default, Clone)]
pub struct ExtensionSet {
    extensions: Vec<Extension>,
    /// Persisted settings for names that are not registered yet.
    pending: HashMap<String, bool>,
}

impl ExtensionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under `name`.
    ///
    /// New registrations are enabled unless a persisted setting for the same
    /// name says otherwise. Registering an existing name replaces it in place.
    pub fn register(
        &mut self,
        name: &str,
        provider: Arc<dyn TemplateRepositoryProvider>,
    ) -> Result<()> {
        if name.trim().is_empty() {
            return Err(TemplarError::InvalidExtension {
                name: name.to_string(),
                message: "extension name must not be empty".to_string(),
            });
        }

        let mut extension = Extension::new(name, provider);
        if let Some(enabled) = self.pending.remove(name) {
            extension.enabled = enabled;
        }

        match self.extensions.iter_mut().find(|e| e.name == name) {
            Some(existing) => *existing = extension,
            None => self.extensions.push(extension),
        }
        Ok(())
    }

    /// Merge persisted settings onto the registered extensions.
    ///
    /// Settings for unregistered names are kept and applied if that name
    /// registers later.
    pub fn apply_settings(&mut self, settings: &[ExtensionDescriptor]) {
        for setting in settings {
            match self.extensions.iter_mut().find(|e| e.name == setting.name) {
                Some(extension) => extension.enabled = setting.enabled,
                None => {
                    tracing::debug!(
                        "Keeping settings for unregistered extension '{}'",
                        setting.name
                    );
                    self.pending.insert(setting.name.clone(), setting.enabled);
                }
            }
        }
    }

    /// Whether an extension with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.extensions.iter().any(|e| e.name == name)
    }

    /// Look up an extension by name.
    pub fn get(&self, name: &str) -> Option<&Extension> {
        self.extensions.iter().find(|e| e.name == name)
    }

    /// Set the enabled flag of an extension.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<()> {
        let extension = self
            .extensions
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| TemplarError::ExtensionNotFound {
                name: name.to_string(),
            })?;
        extension.enabled = enabled;
        Ok(())
    }

    /// Enabled extensions, in registration order.
    pub fn enabled(&self) -> Vec<Extension> {
        self.extensions
            .iter()
            .filter(|e| e.enabled)
            .cloned()
            .collect()
    }

    /// Descriptors of all registered extensions.
    pub fn descriptors(&self) -> Vec<ExtensionDescriptor> {
        self.extensions.iter().map(Extension::descriptor).collect()
    }

    /// Number of registered extensions.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Whether no extensions are registered.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

/// Ask each extension for its repositories and flatten the results.
///
/// An extension whose provider fails or panics is logged and skipped; repositories
/// without a URL are dropped. Order follows the extensions, then each
/// provider's own order.
pub fn collect_repositories_from_extensions(
    extensions: &[Extension],
) -> Vec<RepositoryDescriptor> {
    let mut repositories = Vec::new();

    for extension in extensions {
        let listed = panic::catch_unwind(AssertUnwindSafe(|| {
            extension.provider().list_repositories()
        }));
        match listed {
            Ok(Ok(provided)) => {
                repositories.extend(provided.into_iter().filter(RepositoryDescriptor::has_url));
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    "Extension '{}' failed to provide repositories: {:#}",
                    extension.name(),
                    e
                );
            }
            Err(_) => {
                tracing::warn!(
                    "Extension '{}' panicked while providing repositories",
                    extension.name()
                );
            }
        }
    }

    repositories
}
