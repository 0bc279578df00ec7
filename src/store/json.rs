//! JSON file-backed settings store.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use super::SettingsStore;
use crate::error::{Result, TemplarError};

/// Stores a list as a pretty-printed JSON array in a single file.
#[derive(Debug)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    /// Create a store for the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl<T> SettingsStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<Vec<T>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let items = serde_json::from_str(&content).map_err(|e| TemplarError::ConfigParseError {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        Ok(Some(items))
    }

    /// Save using atomic write so a crash never leaves a half-written file.
    fn save(&self, items: &[T]) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content =
            serde_json::to_string_pretty(items).map_err(|e| TemplarError::Serialization {
                what: self.file_name(),
                message: e.to_string(),
            })?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::info!("{} updated.", self.file_name());
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
