//! Default values for repo-aggregate configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Distro analyzed when `--rosdistro` is not given.
pub const ROSDISTRO: &str = "indigo";

/// Metapackage filter meaning "every package in the distro".
pub const METAPACKAGE: &str = "ALL";

/// Manifest generator program.
pub const GENERATOR: &str = "rosinstall_generator";

pub const GITSTATS: &str = "gitstats";
pub const CLOC: &str = "cloc";
pub const SLOCCOUNT: &str = "sloccount";

/// Default aggregate repository path: `aggregate_<distro>_<label>`.
///
/// `label` is the metapackage, or the rosinstall file stem when a file
/// replaces generation.
pub fn aggregate_path(distro: &str, label: &str) -> PathBuf {
    PathBuf::from(format!("aggregate_{}_{}", distro, label))
}

/// Default analysis output directory: `output_<distro>_<label>`.
pub fn output_dir(distro: &str, label: &str) -> PathBuf {
    PathBuf::from(format!("output_{}_{}", distro, label))
}
