//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

use repo_aggregate::output::OutputConfig;

use crate::commands;

/// Aggregate ROS distro repositories into one git repository and analyze it
#[derive(Parser, Debug)]
#[command(name = "repo-aggregate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Import every repository of a distro into the aggregate and analyze it
    Run(commands::run::RunArgs),

    /// Convert a .repos distro description into a rosinstall list
    ConvertRepos(commands::convert::ConvertArgs),

    /// Summarize unique authors per year from MergeStat JSON reports
    Authors(commands::authors::AuthorsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(self.log_level.as_str()),
        )
        .format_timestamp(None)
        .init();

        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Run(args) => commands::run::execute(args, &output),
            Commands::ConvertRepos(args) => commands::convert::execute(args),
            Commands::Authors(args) => {
                if let Err(message) = args.check_range() {
                    Cli::command()
                        .error(ErrorKind::ArgumentConflict, message)
                        .exit();
                }
                commands::authors::execute(args)
            }
        }
    }
}
