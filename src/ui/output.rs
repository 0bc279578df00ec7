//! Output verbosity.

/// How much the CLI prints besides requested data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Headers, listings and status messages.
    #[default]
    Normal,
    /// Only data, warnings and errors.
    Quiet,
}

impl OutputMode {
    /// Pick the mode for a `--quiet` flag.
    pub fn from_quiet(quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        matches!(self, Self::Normal)
    }
}
