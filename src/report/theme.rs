//! Report styling.

use console::Style;

/// Styles for report output.
#[derive(Debug, Clone)]
pub struct ReportTheme {
    /// Passed checks (green).
    pub success: Style,
    /// Failed checks (red bold).
    pub error: Style,
    /// Broken checks (orange).
    pub warning: Style,
    /// Skipped checks and secondary text (dim).
    pub dim: Style,
    /// Summary and headers (bold).
    pub highlight: Style,
}

impl Default for ReportTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportTheme {
    /// Create the colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            error: Style::new().red().bold(),
            warning: Style::new().color256(208),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            error: Style::new(),
            warning: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
        }
    }

    pub fn format_pass(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_fail(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("! {}", msg)))
    }

    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("- {}", msg)))
    }

    pub fn format_detail(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("    {}", msg)))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_has_markers() {
        let theme = ReportTheme::plain();
        assert_eq!(theme.format_pass("ok"), "✓ ok");
        assert_eq!(theme.format_fail("bad"), "✗ bad");
        assert_eq!(theme.format_error("broken"), "! broken");
        assert_eq!(theme.format_skipped("n/a"), "- n/a");
        assert_eq!(theme.format_detail("why"), "    why");
    }
}
