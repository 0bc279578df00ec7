//! Persistence for repository and extension settings.
//!
//! The registry never touches the filesystem directly; it loads and saves
//! whole lists through a [`SettingsStore`]. [`JsonFileStore`] backs the
//! workspace files and [`MemoryStore`] stands in for them in tests.

pub mod json;
pub mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// A persisted list of settings records.
pub trait SettingsStore<T>: Send + Sync {
    /// Load the persisted list, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<Vec<T>>>;

    /// Overwrite the persisted list.
    fn save(&self, items: &[T]) -> Result<()>;

    /// Short name used in log messages.
    fn describe(&self) -> String;
}
