//! # Run Configuration
//!
//! [`RunConfig`] is the explicit configuration of one aggregation run. It is
//! built once from [`RunOptions`] (what the user asked for) by filling in
//! defaults and validating option combinations, then handed to each
//! component. Nothing here is global.
//!
//! Validation happens before any side effect: conflicting options and a
//! missing rosinstall file are rejected by [`RunConfig::resolve`].

use std::path::PathBuf;

use crate::analysis::AnalysisTools;
use crate::defaults;
use crate::error::{Error, Result};
use crate::manifest::ManifestSource;
use crate::repository::ImportPolicy;

/// Which stages of the run execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Bootstrap, import, then analyze.
    #[default]
    Full,
    /// Only analyze a pre-existing aggregate.
    AnalyzeOnly,
    /// Bootstrap and import without running the statistics tools.
    ImportOnly,
}

impl RunMode {
    pub fn imports(self) -> bool {
        matches!(self, RunMode::Full | RunMode::ImportOnly)
    }

    pub fn analyzes(self) -> bool {
        matches!(self, RunMode::Full | RunMode::AnalyzeOnly)
    }
}

/// User-supplied run options, before defaults are applied.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub rosdistro: Option<String>,
    pub metapackage: Option<String>,
    pub rosinstall_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub aggregate_repo_path: Option<PathBuf>,
    pub analyze_only: bool,
    pub skip_analysis: bool,
    pub skip_existing: bool,
    pub generator: Option<String>,
    pub tools: AnalysisTools,
}

/// Fully resolved configuration of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub manifest: ManifestSource,
    pub aggregate_path: PathBuf,
    pub output_dir: PathBuf,
    pub policy: ImportPolicy,
    pub mode: RunMode,
    pub tools: AnalysisTools,
}

impl RunConfig {
    /// Validate `options` and fill in every default.
    pub fn resolve(options: RunOptions) -> Result<Self> {
        if options.rosinstall_file.is_some() && options.metapackage.is_some() {
            return Err(Error::InvalidOptions {
                message: "you cannot pass a rosinstall file and a metapackage at the same time"
                    .to_string(),
            });
        }
        if options.analyze_only && options.skip_analysis {
            return Err(Error::InvalidOptions {
                message: "--analyze-only and --skip-analysis exclude each other".to_string(),
            });
        }

        let distro = options
            .rosdistro
            .unwrap_or_else(|| defaults::ROSDISTRO.to_string());

        let (manifest, label) = match options.rosinstall_file {
            Some(path) => {
                if !path.is_file() {
                    return Err(Error::InvalidOptions {
                        message: format!("rosinstall file {} does not exist", path.display()),
                    });
                }
                let label = path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| defaults::METAPACKAGE.to_string());
                (ManifestSource::File(path), label)
            }
            None => {
                let metapackage = options
                    .metapackage
                    .unwrap_or_else(|| defaults::METAPACKAGE.to_string());
                let source = ManifestSource::Generate {
                    generator: options
                        .generator
                        .unwrap_or_else(|| defaults::GENERATOR.to_string()),
                    distro: distro.clone(),
                    metapackage: metapackage.clone(),
                };
                (source, metapackage)
            }
        };

        let mode = if options.analyze_only {
            RunMode::AnalyzeOnly
        } else if options.skip_analysis {
            RunMode::ImportOnly
        } else {
            RunMode::Full
        };

        let policy = if options.skip_existing {
            ImportPolicy::SkipExisting
        } else {
            ImportPolicy::Refresh
        };

        Ok(Self {
            manifest,
            aggregate_path: options
                .aggregate_repo_path
                .unwrap_or_else(|| defaults::aggregate_path(&distro, &label)),
            output_dir: options
                .output_dir
                .unwrap_or_else(|| defaults::output_dir(&distro, &label)),
            policy,
            mode,
            tools: options.tools,
        })
    }
}
