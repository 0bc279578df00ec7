//! In-memory settings store.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use super::SettingsStore;
use crate::error::Result;

#[derive(Debug)]
struct Inner<T> {
    items: Option<Vec<T>>,
    saves: usize,
    fail_saves: bool,
}

/// Keeps the "persisted" list in memory.
///
/// Clones share the same contents, so a test can hand one clone to the
/// registry and inspect what was saved through another.
#[derive(Debug)]
pub struct MemoryStore<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> MemoryStore<T> {
    /// A store with nothing saved yet.
    pub fn empty() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                items: None,
                saves: 0,
                fail_saves: false,
            })),
        }
    }

    /// A store that already holds a saved list.
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                items: Some(items),
                saves: 0,
                fail_saves: false,
            })),
        }
    }

    /// Number of times [`SettingsStore::save`] has been called.
    pub fn save_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .saves
    }

    /// Make subsequent saves fail with an IO error.
    pub fn fail_saves(&self, fail: bool) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .fail_saves = fail;
    }
}

impl<T: Clone> MemoryStore<T> {
    /// The currently saved list.
    pub fn items(&self) -> Option<Vec<T>> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .items
            .clone()
    }
}

impl<T> SettingsStore<T> for MemoryStore<T>
where
    T: Clone + Send,
{
    fn load(&self) -> Result<Option<Vec<T>>> {
        Ok(self.items())
    }

    fn save(&self, items: &[T]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.fail_saves {
            let err = io::Error::new(io::ErrorKind::PermissionDenied, "store is read-only");
            return Err(err.into());
        }
        inner.items = Some(items.to_vec());
        inner.saves += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory store".to_string()
    }
}
