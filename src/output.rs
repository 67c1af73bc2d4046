//! # Output Configuration
//!
//! This module controls how the end-of-run report looks, including color and
//! emoji support based on terminal capabilities and user preferences.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;
use std::fmt::Write;

use crate::orchestrator::ImportReport;
use crate::repository::ImportStatus;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `color_flag` is the value of `--color`: `always` forces colors on
    /// (overriding `NO_COLOR`), `never` forces them off, anything else
    /// detects support from the environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        let snapshot = ColorEnv {
            no_color: env::var_os("NO_COLOR").is_some(),
            clicolor: env::var("CLICOLOR").ok(),
            clicolor_force: env::var("CLICOLOR_FORCE").ok(),
            term: env::var("TERM").ok(),
        };
        snapshot
            .decide()
            .unwrap_or_else(|| console::Term::stdout().features().colors_supported())
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// The color-related environment variables of one process.
#[derive(Debug, Default)]
struct ColorEnv {
    no_color: bool,
    clicolor: Option<String>,
    clicolor_force: Option<String>,
    term: Option<String>,
}

impl ColorEnv {
    /// `Some` when the environment settles the question, `None` when it is
    /// up to the terminal. `NO_COLOR` (even empty) beats everything.
    fn decide(&self) -> Option<bool> {
        let forced = self
            .clicolor_force
            .as_deref()
            .is_some_and(|v| !v.is_empty() && v != "0");
        if self.no_color || self.clicolor.as_deref() == Some("0") {
            Some(false)
        } else if forced {
            Some(true)
        } else if self.term.as_deref() == Some("dumb") {
            Some(false)
        } else {
            None
        }
    }
}

/// Returns `emoji_str` when colors are enabled, `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Render the end-of-run import summary and the Import Outcome Map.
pub fn render_report(config: &OutputConfig, report: &ImportReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} Imported {}, refreshed {}, up to date {}, skipped {}",
        emoji(config, "📦", "[IMPORT]"),
        report.count(ImportStatus::Imported),
        report.count(ImportStatus::Refreshed),
        report.count(ImportStatus::UpToDate),
        report.count(ImportStatus::Skipped) + report.skipped.len(),
    );

    if report.errors.is_empty() {
        let _ = writeln!(
            out,
            "{} No errors encountered during import",
            emoji(config, "✅", "[OK]")
        );
        return out;
    }

    let _ = writeln!(
        out,
        "{} Errors encountered during import ({}):",
        emoji(config, "⚠️", "[WARN]"),
        report.errors.len()
    );
    for (name, error) in &report.errors {
        let _ = writeln!(out, "   {}: {}", name, error);
    }
    out
}
