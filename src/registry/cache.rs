//! In-memory cache of the full template list.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use super::template::TemplateRecord;

/// Cached result of the last full refresh.
///
/// Every invalidation bumps a generation counter. A refresh records the
/// generation it started from and only clears the stale flag if nothing
/// invalidated the cache while it was running.
#[derive(Debug, Clone)]
pub struct TemplateCache {
    data: Option<Arc<Vec<TemplateRecord>>>,
    stale: bool,
    generation: u64,
    refreshed_at: Option<DateTime<Utc>>,
}

/// Snapshot of the cache state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStatus {
    /// Whether the next full listing will refresh.
    pub stale: bool,
    /// Number of cached templates, if anything is cached.
    pub template_count: Option<usize>,
    /// When the cache was last written.
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl Default for TemplateCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateCache {
    /// Create an empty, stale cache.
    pub fn new() -> Self {
        Self {
            data: None,
            stale: true,
            generation: 0,
            refreshed_at: None,
        }
    }

    /// The cached templates, unless the cache is stale.
    pub fn fresh(&self) -> Option<Arc<Vec<TemplateRecord>>> {
        if self.stale {
            None
        } else {
            self.data.clone()
        }
    }

    /// Mark the cache stale.
    pub fn invalidate(&mut self) {
        self.stale = true;
        self.generation += 1;
    }

    /// Current generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the cache is stale.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Store a refresh result computed from `generation`.
    pub fn store(
        &mut self,
        templates: Vec<TemplateRecord>,
        generation: u64,
    ) -> Arc<Vec<TemplateRecord>> {
        let templates = Arc::new(templates);
        self.data = Some(Arc::clone(&templates));
        self.refreshed_at = Some(Utc::now());
        if generation == self.generation {
            self.stale = false;
        } else {
            tracing::debug!("Template cache invalidated during refresh; keeping it stale");
        }
        templates
    }

    /// Describe the cache state.
    pub fn status(&self) -> CacheStatus {
        CacheStatus {
            stale: self.stale,
            template_count: self.data.as_ref().map(|d| d.len()),
            refreshed_at: self.refreshed_at,
        }
    }
}
