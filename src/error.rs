//! # Error Handling
//!
//! This module defines the centralized error type for `repo-aggregate`. It
//! uses `thiserror` to build a single `Error` enum covering every failure the
//! library can report, each variant carrying enough context to be printed on
//! its own in the import report.
//!
//! Failures of external programs are split three ways so callers (and the
//! Import Outcome Map) can tell them apart:
//!
//! - **`CommandNotFound`**: the program could not be spawned because it is
//!   not installed or not on `PATH`.
//! - **`CommandFailed`**: the program ran and exited with a nonzero status.
//! - **`UnexpectedOutput`**: the program succeeded but its output could not
//!   be used.
//!
//! The `Result<T>` alias is used throughout the library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for repo-aggregate operations
#[derive(Error, Debug)]
pub enum Error {
    /// An external program could not be found.
    #[error("Command not found: {program} (is it installed and on PATH?)")]
    CommandNotFound { program: String },

    /// An external program could not be started for a reason other than
    /// being absent.
    #[error("Failed to start {command}: {message}")]
    CommandSpawn { command: String, message: String },

    /// An external program exited with a nonzero status.
    #[error("Command failed ({}): {command}{}", describe_exit(*code), stderr_suffix(stderr))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// An external program succeeded but produced output that could not be
    /// used.
    #[error("Unexpected output from {command}: {message}")]
    UnexpectedOutput { command: String, message: String },

    /// A descriptor's version names no branch, tag or commit of its remote.
    #[error("Version {version} of {name} not found as a branch, tag or commit")]
    VersionNotFound { name: String, version: String },

    /// An existing aggregate directory is not a usable git repository.
    #[error("Invalid aggregate repository at {}: {message}", path.display())]
    InvalidAggregate { path: PathBuf, message: String },

    /// The manifest document could not be interpreted.
    #[error("Manifest parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ManifestParse {
        message: String,
        /// Optional hint for how to fix the manifest
        hint: Option<String>,
    },

    /// Run options are inconsistent or refer to missing files.
    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },

    /// A yearly author summary could not be loaded.
    #[error("Author summary error for {}: {message}", path.display())]
    AuthorSummary { path: PathBuf, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(" - {}", stderr)
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
