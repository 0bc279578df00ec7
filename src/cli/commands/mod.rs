//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which opens the
//! workspace's registry once and routes the subcommand to its
//! implementation.

pub mod batch;
pub mod completions;
pub mod dispatcher;
pub mod extensions;
pub mod repos;
pub mod templates;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
