//! Terminal styles for sweep output
//!
//! Each style names what a line means to the user, not its color.

use std::sync::LazyLock;

use owo_colors::Style;

/// Styles for the lines a sweep run prints
pub struct SweepColors {
    /// A deletion command being submitted
    pub command: Style,
    /// A deletion command reported under dry-run
    pub planned: Style,
    /// The summary of deleted branches
    pub deleted: Style,
    /// A local branch withheld because another remote still has it
    pub kept: Style,
    /// Forced dry-run, unknown remotes and ambiguous refs
    pub warning: Style,
    /// A rejected command
    pub failed: Style,
}

impl Default for SweepColors {
    fn default() -> Self {
        Self {
            command: Style::new().blue(),
            planned: Style::new().dimmed(),
            deleted: Style::new().green(),
            kept: Style::new().cyan(),
            warning: Style::new().yellow(),
            failed: Style::new().red().bold(),
        }
    }
}

pub static COLORS: LazyLock<SweepColors> = LazyLock::new(SweepColors::default);
