//! Terminal output for the templar CLI.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for real terminal output
//! - [`MockUI`] for capturing output in tests
//! - [`Table`] for aligned listings
//!
//! # Example
//!
//! ```
//! use templar::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.success("Repository added");
//! assert_eq!(ui.successes(), ["Repository added"]);
//! ```

pub mod mock;
pub mod output;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use table::Table;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, TemplarTheme};

/// Trait for user-facing output.
///
/// This trait allows capturing output in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a header line above a listing.
    fn show_header(&mut self, title: &str);

    /// Write machine-readable output. Never suppressed.
    fn data(&mut self, content: &str);
}
