//! templar - Project template registry.
//!
//! templar aggregates project templates from remote template repositories
//! (JSON indexes served over HTTP) and from repositories contributed by
//! extensions, and manages the persisted list of repositories.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Workspace paths and registry settings
//! - [`error`] - Error types and result aliases
//! - [`extension`] - Extensions that contribute repositories
//! - [`registry`] - Template fetching, aggregation and caching
//! - [`repository`] - Repository descriptors and the repository list
//! - [`store`] - Persistence of repository and extension settings
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use templar::registry::{filter_templates_by_style, TemplateRecord};
//!
//! let templates = vec![TemplateRecord {
//!     label: "Go".to_string(),
//!     description: "Go template".to_string(),
//!     language: "go".to_string(),
//!     url: "https://example.com/go".to_string(),
//!     project_type: "docker".to_string(),
//!     project_style: None,
//! }];
//!
//! // Templates without a style count as "Codewind".
//! assert_eq!(filter_templates_by_style(&templates, "Codewind").len(), 1);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod extension;
pub mod registry;
pub mod repository;
pub mod store;
pub mod ui;

pub use error::{Result, TemplarError};
pub use registry::{TemplateQuery, TemplateRegistry};
