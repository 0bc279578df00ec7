//! Workspace file locations.

use std::path::{Path, PathBuf};

/// Directory under the workspace that holds templar's files.
pub const CONFIG_DIR: &str = ".config";

/// Persisted repository list.
pub const REPOSITORY_LIST_FILE: &str = "repository_list.json";

/// Persisted extension enabled flags.
pub const EXTENSION_SETTINGS_FILE: &str = "template_extension_settings.json";

/// Optional registry settings.
pub const SETTINGS_FILE: &str = "templar.yml";

/// Paths to the files templar reads and writes for a workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    workspace: PathBuf,
}

impl ConfigPaths {
    /// Resolve file locations under `workspace`.
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }

    /// The workspace root.
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// `<workspace>/.config`
    pub fn config_dir(&self) -> PathBuf {
        self.workspace.join(CONFIG_DIR)
    }

    /// `<workspace>/.config/repository_list.json`
    pub fn repository_list(&self) -> PathBuf {
        self.config_dir().join(REPOSITORY_LIST_FILE)
    }

    /// `<workspace>/.config/template_extension_settings.json`
    pub fn extension_settings(&self) -> PathBuf {
        self.config_dir().join(EXTENSION_SETTINGS_FILE)
    }

    /// `<workspace>/.config/templar.yml`
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir().join(SETTINGS_FILE)
    }
}
