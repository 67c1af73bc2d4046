//! Convert-repos command implementation
//!
//! Reads a `.repos` distro description and writes the equivalent rosinstall
//! list, either to stdout or to `--output`. The result can be fed straight
//! back into `run --rosinstall-file`.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use repo_aggregate::convert;

/// Arguments for the convert-repos command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// The .repos file to convert
    #[arg(value_name = "FILE", default_value = "target.repos")]
    pub repos_file: PathBuf,

    /// Write the rosinstall list here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Execute the convert-repos command
pub fn execute(args: ConvertArgs) -> Result<()> {
    let rendered = convert::convert_file(&args.repos_file)
        .with_context(|| format!("Failed to convert {}", args.repos_file.display()))?;

    match args.output {
        Some(path) => {
            fs::write(&path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote rosinstall list to {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
