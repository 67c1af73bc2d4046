//! Run command implementation
//!
//! The run command executes a full aggregation pass:
//! 1. Bootstrap the aggregate repository
//! 2. Load or generate the manifest
//! 3. Import every git repository as a subtree, collecting failures
//! 4. Run the statistics tools
//! 5. Print the Import Outcome Map
//!
//! Per-repository import failures are reported but never change the exit
//! status; every other failure is fatal.

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use repo_aggregate::analysis::{AnalysisRunner, AnalysisTools};
use repo_aggregate::config::{RunConfig, RunOptions};
use repo_aggregate::defaults;
use repo_aggregate::orchestrator;
use repo_aggregate::output::{emoji, render_report, OutputConfig};
use repo_aggregate::repository::AggregateRepository;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// The rosdistro to analyze
    #[arg(long, value_name = "DISTRO", default_value = defaults::ROSDISTRO)]
    pub rosdistro: String,

    /// The metapackage to analyze with all dependencies [default: ALL]
    #[arg(long, value_name = "NAME", conflicts_with = "rosinstall_file")]
    pub metapackage: Option<String>,

    /// Use this rosinstall file instead of generating one
    #[arg(long, value_name = "FILE", value_parser = existing_file)]
    pub rosinstall_file: Option<PathBuf>,

    /// Directory for analysis output [default: output_<ROSDISTRO>_<METAPACKAGE>]
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Aggregate repository path [default: aggregate_<ROSDISTRO>_<METAPACKAGE>]
    #[arg(long, value_name = "DIR")]
    pub aggregate_repo_path: Option<PathBuf>,

    /// Only run the analysis, do not download code
    #[arg(long, conflicts_with = "skip_analysis")]
    pub analyze_only: bool,

    /// Only download code, do not run the analysis
    #[arg(long)]
    pub skip_analysis: bool,

    /// Leave repositories that were already imported untouched instead of
    /// re-fetching and re-merging them
    #[arg(long)]
    pub skip_existing: bool,

    /// Manifest generator program
    #[arg(long, value_name = "PROGRAM", env = "REPO_AGGREGATE_GENERATOR")]
    pub generator: Option<String>,

    /// gitstats program
    #[arg(long, value_name = "PROGRAM", env = "REPO_AGGREGATE_GITSTATS", default_value = defaults::GITSTATS)]
    pub gitstats: String,

    /// cloc program
    #[arg(long, value_name = "PROGRAM", env = "REPO_AGGREGATE_CLOC", default_value = defaults::CLOC)]
    pub cloc: String,

    /// sloccount program
    #[arg(long, value_name = "PROGRAM", env = "REPO_AGGREGATE_SLOCCOUNT", default_value = defaults::SLOCCOUNT)]
    pub sloccount: String,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

fn existing_file(value: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err("rosinstall file passed does not exist".to_string())
    }
}

impl RunArgs {
    fn into_options(self) -> RunOptions {
        RunOptions {
            rosdistro: Some(self.rosdistro),
            metapackage: self.metapackage,
            rosinstall_file: self.rosinstall_file,
            output_dir: self.output_dir,
            aggregate_repo_path: self.aggregate_repo_path,
            analyze_only: self.analyze_only,
            skip_analysis: self.skip_analysis,
            skip_existing: self.skip_existing,
            generator: self.generator,
            tools: AnalysisTools {
                gitstats: self.gitstats,
                cloc: self.cloc,
                sloccount: self.sloccount,
            },
        }
    }
}

fn progress_bar(quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(0);
    bar.set_style(ProgressStyle::with_template(
        "{spinner} [{bar:30}] {pos}/{len} {msg}",
    )?);
    Ok(bar)
}

/// Execute the run command
pub fn execute(args: RunArgs, output: &OutputConfig) -> Result<()> {
    let quiet = args.quiet;
    let config = RunConfig::resolve(args.into_options())?;

    if !quiet {
        println!(
            "{} Aggregate repository: {}",
            emoji(output, "🔍", "[RUN]"),
            config.aggregate_path.display()
        );
    }

    let repo = AggregateRepository::new(&config.aggregate_path);
    let analysis = AnalysisRunner::new(config.tools.clone());
    let progress = progress_bar(quiet)?;

    let report = orchestrator::execute(&config, &repo, &analysis, &progress)?;

    if config.mode.analyzes() && !quiet {
        println!(
            "{} Analysis written to {}",
            emoji(output, "📊", "[STATS]"),
            config.output_dir.display()
        );
    }
    print!("{}", render_report(output, &report));

    Ok(())
}
