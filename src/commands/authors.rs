//! Authors command implementation
//!
//! Collects the `uniqueAuthors` count of every `mergestat_<year>.json`
//! report in a directory and writes them as CSV. Years whose report is
//! missing or malformed are skipped with a warning.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use repo_aggregate::authors;

/// Arguments for the authors command
#[derive(Args, Debug)]
pub struct AuthorsArgs {
    /// Directory containing the mergestat_<year>.json reports
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub input_dir: PathBuf,

    /// First year to include
    #[arg(long, default_value_t = 2008)]
    pub from: u32,

    /// Last year to include
    #[arg(long, default_value_t = 2022)]
    pub to: u32,

    /// CSV file to write
    #[arg(short, long, value_name = "FILE", default_value = "unique_authors.csv")]
    pub output: PathBuf,
}

impl AuthorsArgs {
    /// Check that `--from` does not come after `--to`.
    pub fn check_range(&self) -> std::result::Result<(), String> {
        if self.from > self.to {
            return Err(format!(
                "Empty year range: --from {} is after --to {}",
                self.from, self.to
            ));
        }
        Ok(())
    }

    fn year_count(&self) -> u64 {
        u64::from(self.to) - u64::from(self.from) + 1
    }
}

/// Execute the authors command
pub fn execute(args: AuthorsArgs) -> Result<()> {
    if let Err(message) = args.check_range() {
        bail!(message);
    }

    let counts = authors::collect(&args.input_dir, args.from, args.to);
    fs::write(&args.output, authors::to_csv(&counts))
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Wrote {} of {} years to {}",
        counts.len(),
        args.year_count(),
        args.output.display()
    );
    Ok(())
}
