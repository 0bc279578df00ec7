//! Template extensions.
//!
//! An extension is a pluggable provider that contributes template
//! repositories at runtime, on top of the static repository list. Providers
//! implement [`TemplateRepositoryProvider`]; the registered set and its
//! enabled state live in an [`ExtensionSet`].

pub mod provider;
pub mod set;

pub use provider::{
    parse_provided_repositories, JsonFileRepositoryProvider, StaticRepositoryProvider,
    TemplateRepositoryProvider,
};
pub use set::{collect_repositories_from_extensions, Extension, ExtensionDescriptor, ExtensionSet};
