//! Unique-author summary across yearly MergeStat reports.
//!
//! Each year has a `mergestat_<year>.json` summary containing a
//! `uniqueAuthors` count. This module gathers those counts for a range of
//! years and renders them as a two-column CSV.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

use crate::error::{Error, Result};

/// CSV header written above the per-year rows.
pub const CSV_HEADER: &str = "year, unique_authors";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MergestatSummary {
    unique_authors: u64,
}

/// Path of the summary for `year` inside `dir`.
pub fn summary_path(dir: &Path, year: u32) -> PathBuf {
    dir.join(format!("mergestat_{}.json", year))
}

/// Read the `uniqueAuthors` count from one summary file.
pub fn load_unique_authors(path: &Path) -> Result<u64> {
    let content = fs::read_to_string(path).map_err(|e| Error::AuthorSummary {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let summary: MergestatSummary =
        serde_json::from_str(&content).map_err(|e| Error::AuthorSummary {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(summary.unique_authors)
}

/// Collect counts for every year in `from..=to` whose summary loads.
///
/// Years that fail to load are logged and left out.
pub fn collect(dir: &Path, from: u32, to: u32) -> BTreeMap<u32, u64> {
    let mut counts = BTreeMap::new();
    for year in from..=to {
        let path = summary_path(dir, year);
        match load_unique_authors(&path) {
            Ok(count) => {
                info!("Year {}: {} unique authors", year, count);
                counts.insert(year, count);
            }
            Err(e) => warn!("Failed to load year {}: {}", year, e),
        }
    }
    counts
}

/// Render counts as CSV, one row per year in ascending order.
pub fn to_csv(counts: &BTreeMap<u32, u64>) -> String {
    let mut csv = format!("{}\n", CSV_HEADER);
    for (year, count) in counts {
        csv.push_str(&format!("{}, {}\n", year, count));
    }
    csv
}
