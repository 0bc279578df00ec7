//! Visual theme and styling.

use console::Style;

/// templar's visual theme.
#[derive(Debug, Clone)]
pub struct TemplarTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (yellow).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for headers (cyan bold).
    pub header: Style,
    /// Style for enabled markers (green).
    pub enabled: Style,
    /// Style for disabled markers (dim).
    pub disabled: Style,
}

impl Default for TemplarTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplarTheme {
    /// Create the colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            header: Style::new().cyan().bold(),
            enabled: Style::new().green(),
            disabled: Style::new().dim(),
        }
    }

    /// Colored theme when stdout is a terminal, plain otherwise.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Create a theme without colors (for non-TTY or `NO_COLOR`).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            header: Style::new(),
            enabled: Style::new(),
            disabled: Style::new(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }

    /// Render an enabled flag as a word.
    pub fn format_enabled(&self, enabled: bool) -> String {
        if enabled {
            format!("{}", self.enabled.apply_to("enabled"))
        } else {
            format!("{}", self.disabled.apply_to("disabled"))
        }
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    console::Term::stdout().is_term()
}
