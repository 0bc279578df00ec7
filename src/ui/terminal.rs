//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{OutputMode, TemplarTheme, UserInterface};

/// Writes to stdout (data, messages) and stderr (warnings, errors).
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: TemplarTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a terminal UI, using colors when stdout is a terminal.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: TemplarTheme::detect(),
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_header(title)).ok();
        }
    }

    fn data(&mut self, content: &str) {
        writeln!(self.out, "{}", content).ok();
    }
}
