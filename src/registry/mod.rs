//! Template registry for templar.
//!
//! This module aggregates project templates from remote repositories:
//! - Static repositories (persisted in `.config/repository_list.json`)
//! - Repositories provided by enabled extensions
//!
//! # Refresh
//!
//! Every repository is fetched concurrently; a repository that fails is
//! logged and contributes nothing. The merged list is sorted by label. The
//! full listing is cached until a repository or extension change invalidates
//! it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use templar::registry::{HttpFetcher, TemplateQuery, TemplateRegistry};
//!
//! let fetcher = HttpFetcher::new().unwrap();
//! let registry = TemplateRegistry::in_memory(Arc::new(fetcher));
//!
//! for template in registry.get_templates(&TemplateQuery::all().with_style("Codewind")) {
//!     println!("{}: {}", template.label, template.url);
//! }
//! ```

pub mod batch;
pub mod cache;
pub mod catalog;
pub mod fetch;
pub mod template;

// Re-exports
pub use batch::{BatchOperation, ExtensionOperation, OperationResult, RepositoryOperation};
pub use cache::{CacheStatus, TemplateCache};
pub use catalog::{merge_repositories, TemplateQuery, TemplateRegistry};
pub use fetch::{HttpFetcher, TemplateFetcher, DEFAULT_FETCH_TIMEOUT};
pub use template::{
    compare_labels, filter_templates_by_style, sort_by_label, template_styles, TemplateRecord,
    TemplateSummary, DEFAULT_PROJECT_STYLE,
};
