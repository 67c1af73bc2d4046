//! Runs the external statistics tools against the aggregate repository.
//!
//! Three tools run in a fixed order, each writing into the output directory:
//!
//! | tool        | output                    |
//! |-------------|---------------------------|
//! | `gitstats`  | `<output>/gitstats/`      |
//! | `cloc`      | `<output>/cloc.txt`       |
//! | `sloccount` | `<output>/sloccount.txt`  |
//!
//! The first tool that fails aborts the analysis.

use std::fs;
use std::path::Path;

use log::info;

use crate::defaults;
use crate::error::Result;
use crate::process;

/// Program names (or paths) of the statistics tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTools {
    pub gitstats: String,
    pub cloc: String,
    pub sloccount: String,
}

impl Default for AnalysisTools {
    fn default() -> Self {
        Self {
            gitstats: defaults::GITSTATS.to_string(),
            cloc: defaults::CLOC.to_string(),
            sloccount: defaults::SLOCCOUNT.to_string(),
        }
    }
}

/// Runs every tool against one aggregate.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRunner {
    tools: AnalysisTools,
}

impl AnalysisRunner {
    pub fn new(tools: AnalysisTools) -> Self {
        Self { tools }
    }

    pub fn run(&self, aggregate_path: &Path, output_dir: &Path) -> Result<()> {
        fs::create_dir_all(output_dir)?;
        self.run_gitstats(aggregate_path, output_dir)?;
        self.run_cloc(aggregate_path, output_dir)?;
        self.run_sloccount(aggregate_path, output_dir)?;
        info!("Analysis written to {}", output_dir.display());
        Ok(())
    }

    fn run_gitstats(&self, aggregate_path: &Path, output_dir: &Path) -> Result<()> {
        let gitstats_dir = output_dir.join("gitstats");
        fs::create_dir_all(&gitstats_dir)?;
        process::run(
            &self.tools.gitstats,
            [aggregate_path.as_os_str(), gitstats_dir.as_os_str()],
            None,
        )
    }

    fn run_cloc(&self, aggregate_path: &Path, output_dir: &Path) -> Result<()> {
        let mut out_arg = std::ffi::OsString::from("--out=");
        out_arg.push(output_dir.join("cloc.txt"));
        process::run(
            &self.tools.cloc,
            [aggregate_path.as_os_str(), out_arg.as_os_str()],
            None,
        )
    }

    fn run_sloccount(&self, aggregate_path: &Path, output_dir: &Path) -> Result<()> {
        let report = process::run_capture_bytes(&self.tools.sloccount, [aggregate_path], None)?;
        fs::write(output_dir.join("sloccount.txt"), report)?;
        Ok(())
    }
}
