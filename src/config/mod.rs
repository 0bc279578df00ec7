//! Workspace configuration for templar.
//!
//! - File locations in [`paths`]
//! - Registry settings (`.config/templar.yml`) in [`settings`]
//!
//! # Example
//!
//! ```
//! use templar::config::{load_settings_file, ConfigPaths};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let paths = ConfigPaths::new(temp.path());
//! fs::create_dir_all(paths.config_dir()).unwrap();
//! fs::write(paths.settings_file(), "fetch_timeout_secs: 5").unwrap();
//!
//! let settings = load_settings_file(&paths).unwrap();
//! assert_eq!(settings.fetch_timeout_secs, Some(5));
//! ```

pub mod paths;
pub mod settings;

pub use paths::ConfigPaths;
pub use settings::{
    load_settings, load_settings_file, parse_settings, ExtensionConfig, RegistrySettings,
    FETCH_TIMEOUT_ENV,
};
