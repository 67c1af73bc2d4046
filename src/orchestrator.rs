//! # Run Orchestration
//!
//! Sequences one aggregation run:
//!
//! 1. **Bootstrap** the aggregate repository (fatal on failure).
//! 2. **Load** the manifest (fatal on failure).
//! 3. **Import** each git descriptor in manifest order. A failure is caught
//!    per repository and recorded in the [`ImportOutcomeMap`]; the loop
//!    always continues with the next descriptor.
//! 4. **Analyze** the aggregate (fatal on failure).
//!
//! Which stages run is decided by the [`RunMode`](crate::config::RunMode)
//! of the [`RunConfig`].

use std::collections::BTreeMap;

use indicatif::ProgressBar;
use log::{info, warn};

use crate::analysis::AnalysisRunner;
use crate::config::RunConfig;
use crate::error::Result;
use crate::manifest::ManifestEntry;
use crate::repository::{AggregateRepository, ImportPolicy, ImportStatus};

/// `local-name` to error description for every import that failed.
///
/// A name that is absent either imported successfully or was never
/// attempted (non-git entries).
pub type ImportOutcomeMap = BTreeMap<String, String>;

/// Everything one import pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Successful imports and how each went, in manifest order.
    pub completed: Vec<(String, ImportStatus)>,
    /// Manifest entries that were not imported, with the reason.
    pub skipped: Vec<(String, String)>,
    pub errors: ImportOutcomeMap,
}

impl ImportReport {
    pub fn count(&self, status: ImportStatus) -> usize {
        self.completed.iter().filter(|(_, s)| *s == status).count()
    }
}

/// Import every git entry into `repo`, collecting failures instead of
/// stopping at them.
pub fn update_aggregate(
    repo: &AggregateRepository,
    entries: &[ManifestEntry],
    policy: ImportPolicy,
    progress: &ProgressBar,
) -> ImportReport {
    let mut report = ImportReport::default();

    for entry in entries {
        let descriptor = match entry {
            ManifestEntry::Git(descriptor) => descriptor,
            ManifestEntry::Skipped { kind, name, reason } => {
                let label = name.clone().unwrap_or_else(|| "<unnamed>".to_string());
                info!(
                    "Skipping element {} ({}): {}",
                    label,
                    kind.as_deref().unwrap_or("unknown kind"),
                    reason
                );
                report.skipped.push((label, reason.clone()));
                continue;
            }
        };

        progress.set_message(descriptor.local_name.clone());
        match repo.import(descriptor, policy) {
            Ok(status) => report
                .completed
                .push((descriptor.local_name.clone(), status)),
            Err(e) => {
                warn!("Failed to import {}: {}", descriptor.local_name, e);
                report
                    .errors
                    .insert(descriptor.local_name.clone(), e.to_string());
            }
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    report
}

/// Execute a whole run as described by `config`.
///
/// Returns the import report, which is empty in analyze-only mode.
pub fn execute(
    config: &RunConfig,
    repo: &AggregateRepository,
    analysis: &AnalysisRunner,
    progress: &ProgressBar,
) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    if config.mode.imports() {
        repo.bootstrap()?;
        let entries = config.manifest.load()?;
        let actionable = entries
            .iter()
            .filter(|e| matches!(e, ManifestEntry::Git(_)))
            .count();
        progress.set_length(actionable as u64);
        report = update_aggregate(repo, &entries, config.policy, progress);
    } else {
        info!("Analyze only: skipping bootstrap and import");
    }

    if config.mode.analyzes() {
        analysis.run(repo.path(), &config.output_dir)?;
    }

    Ok(report)
}
