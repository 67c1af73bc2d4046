//! # Aggregate Repository Management
//!
//! This module owns the aggregate repository: the single local git
//! repository into which every upstream repository is merged as a subtree.
//!
//! ## Design
//!
//! All version-control work goes through the **`GitOperations`** trait.
//! `DefaultGitOperations` forwards to the system `git` binary (see
//! [`crate::git`]); tests swap in a mock that records the calls, so the
//! first-import and re-import sequences can be checked without touching a
//! real repository.
//!
//! `AggregateRepository` provides the two operations that matter:
//!
//! - **`bootstrap`**: create the repository with an initial commit, or
//!   verify that an existing directory is a usable repository.
//! - **`import`**: merge one [`Descriptor`] into the `local-name/`
//!   subdirectory. Whether this is a first import or a re-import is decided
//!   solely by whether that subdirectory already exists.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::{Error, Result};
use crate::manifest::Descriptor;

/// README written into a freshly bootstrapped aggregate.
pub const README_CONTENT: &str =
    "A directory into which to import ROS repos for statistical analysis";

/// Commit message of the bootstrap commit.
pub const BOOTSTRAP_MESSAGE: &str = "A repo for ROS statistics";

/// Commit message recording the import of `name`.
pub fn import_message(name: &str) -> String {
    format!("Imported {} as a subtree", name)
}

/// Trait for git operations - allows mocking in tests
pub trait GitOperations {
    fn init(&self, repo_dir: &Path) -> Result<()>;

    fn add(&self, repo_dir: &Path, path: &str) -> Result<()>;

    fn commit(&self, repo_dir: &Path, message: &str) -> Result<()>;

    /// Whether `repo_dir` is a work tree with a resolvable `HEAD` commit.
    fn has_head_commit(&self, repo_dir: &Path) -> Result<bool>;

    /// Configured URL of remote `name`, or `None` if it is not registered.
    fn remote_url(&self, repo_dir: &Path, name: &str) -> Result<Option<String>>;

    fn remote_add(&self, repo_dir: &Path, name: &str, url: &str) -> Result<()>;

    fn remote_set_url(&self, repo_dir: &Path, name: &str, url: &str) -> Result<()>;

    /// Fetch branches and tags of remote `name`.
    fn fetch(&self, repo_dir: &Path, name: &str) -> Result<()>;

    /// Commit id named by `rev`, or `None` if it names no commit.
    fn resolve_commit(&self, repo_dir: &Path, rev: &str) -> Result<Option<String>>;

    /// Merge `rev` with the "ours" strategy, leaving the merge uncommitted.
    fn merge_ours(&self, repo_dir: &Path, rev: &str) -> Result<()>;

    /// Whether a merge is waiting to be committed.
    fn merge_in_progress(&self, repo_dir: &Path) -> Result<bool>;

    /// Abandon a pending merge, restoring the pre-merge state.
    fn merge_abort(&self, repo_dir: &Path) -> Result<()>;

    /// Read the tree of `rev` into the index and work tree under `prefix`.
    fn read_tree(&self, repo_dir: &Path, prefix: &str, rev: &str) -> Result<()>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command.
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn init(&self, repo_dir: &Path) -> Result<()> {
        crate::git::init(repo_dir)
    }

    fn add(&self, repo_dir: &Path, path: &str) -> Result<()> {
        crate::git::add(repo_dir, path)
    }

    fn commit(&self, repo_dir: &Path, message: &str) -> Result<()> {
        crate::git::commit(repo_dir, message)
    }

    fn has_head_commit(&self, repo_dir: &Path) -> Result<bool> {
        crate::git::has_head_commit(repo_dir)
    }

    fn remote_url(&self, repo_dir: &Path, name: &str) -> Result<Option<String>> {
        crate::git::remote_url(repo_dir, name)
    }

    fn remote_add(&self, repo_dir: &Path, name: &str, url: &str) -> Result<()> {
        crate::git::remote_add(repo_dir, name, url)
    }

    fn remote_set_url(&self, repo_dir: &Path, name: &str, url: &str) -> Result<()> {
        crate::git::remote_set_url(repo_dir, name, url)
    }

    fn fetch(&self, repo_dir: &Path, name: &str) -> Result<()> {
        crate::git::fetch(repo_dir, name)
    }

    fn resolve_commit(&self, repo_dir: &Path, rev: &str) -> Result<Option<String>> {
        crate::git::resolve_commit(repo_dir, rev)
    }

    fn merge_ours(&self, repo_dir: &Path, rev: &str) -> Result<()> {
        crate::git::merge_ours_no_commit(repo_dir, rev)
    }

    fn merge_in_progress(&self, repo_dir: &Path) -> Result<bool> {
        crate::git::merge_in_progress(repo_dir)
    }

    fn merge_abort(&self, repo_dir: &Path) -> Result<()> {
        crate::git::merge_abort(repo_dir)
    }

    fn read_tree(&self, repo_dir: &Path, prefix: &str, rev: &str) -> Result<()> {
        crate::git::read_tree_prefix(repo_dir, prefix, rev)
    }
}

/// What to do with a repository whose subtree already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportPolicy {
    /// Re-fetch and re-merge every time.
    #[default]
    Refresh,
    /// Treat an existing subtree as final and leave it alone.
    SkipExisting,
}

/// What an import actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStatus {
    /// The subtree was created.
    Imported,
    /// An existing subtree was merged with newly fetched history.
    Refreshed,
    /// An existing subtree was fetched but there was nothing to merge.
    UpToDate,
    /// An existing subtree was left alone because of `SkipExisting`.
    Skipped,
}

/// Whether an aggregate bootstrap created anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStatus {
    Created,
    AlreadyExists,
}

/// The aggregate repository at a fixed path.
pub struct AggregateRepository {
    path: PathBuf,
    git_ops: Box<dyn GitOperations>,
}

impl AggregateRepository {
    /// Creates an `AggregateRepository` at `path` backed by the system `git`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_operations(path, Box::new(DefaultGitOperations))
    }

    /// Creates an `AggregateRepository` with a custom `GitOperations`
    /// implementation.
    pub fn with_operations(path: impl Into<PathBuf>, git_ops: Box<dyn GitOperations>) -> Self {
        Self {
            path: path.into(),
            git_ops,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that holds (or will hold) the subtree for `local_name`.
    pub fn subtree_path(&self, local_name: &str) -> PathBuf {
        self.path.join(local_name)
    }

    /// Ensure the aggregate exists with at least one commit.
    ///
    /// An existing directory is accepted only if it is a git work tree with
    /// a `HEAD` commit; anything else is an `InvalidAggregate` error. A
    /// second call on the same path does nothing.
    pub fn bootstrap(&self) -> Result<BootstrapStatus> {
        if self.path.exists() {
            if !self.path.is_dir() {
                return Err(Error::InvalidAggregate {
                    path: self.path.clone(),
                    message: "path exists and is not a directory".to_string(),
                });
            }
            if !self.path.join(".git").exists() || !self.git_ops.has_head_commit(&self.path)? {
                return Err(Error::InvalidAggregate {
                    path: self.path.clone(),
                    message: "directory exists but is not a git repository with a commit"
                        .to_string(),
                });
            }
            info!("Aggregate repo already exists, skipping setup");
            return Ok(BootstrapStatus::AlreadyExists);
        }

        info!("Setting up aggregate repo {}", self.path.display());
        fs::create_dir_all(&self.path)?;
        self.git_ops.init(&self.path)?;
        fs::write(self.path.join("README"), README_CONTENT)?;
        self.git_ops.add(&self.path, "README")?;
        self.git_ops.commit(&self.path, BOOTSTRAP_MESSAGE)?;
        Ok(BootstrapStatus::Created)
    }

    /// Merge `descriptor` into its subtree according to `policy`.
    ///
    /// Any failing git step aborts this repository's import and is returned
    /// to the caller; nothing is rolled back.
    pub fn import(&self, descriptor: &Descriptor, policy: ImportPolicy) -> Result<ImportStatus> {
        let name = descriptor.local_name.as_str();
        let first_time = !self.subtree_path(name).exists();

        if !first_time && policy == ImportPolicy::SkipExisting {
            info!("Subtree {} already exists, skipping", name);
            return Ok(ImportStatus::Skipped);
        }

        self.configure_remote(name, &descriptor.uri, first_time)?;

        self.git_ops.fetch(&self.path, name)?;
        let commit = self.resolve_version(descriptor)?;
        self.git_ops.merge_ours(&self.path, &commit)?;

        self.complete_merge(name, &commit, first_time).inspect_err(|_| {
            self.abandon_merge(name);
        })
    }

    /// Commit named by the descriptor's version: a branch of its remote,
    /// else a tag of its remote, else a commit id.
    fn resolve_version(&self, descriptor: &Descriptor) -> Result<String> {
        for candidate in descriptor.candidate_refs() {
            if let Some(commit) = self.git_ops.resolve_commit(&self.path, &candidate)? {
                return Ok(commit);
            }
        }
        Err(Error::VersionNotFound {
            name: descriptor.local_name.clone(),
            version: descriptor.version.clone(),
        })
    }

    /// Point remote `name` at `uri`, adding it if missing.
    ///
    /// A remote can outlive a failed first import, so it is looked up even
    /// when the subtree does not exist yet.
    fn configure_remote(&self, name: &str, uri: &str, first_time: bool) -> Result<()> {
        match self.git_ops.remote_url(&self.path, name)? {
            Some(existing) if existing == uri => {}
            Some(existing) => {
                info!("Remote {} moved from {} to {}", name, existing, uri);
                self.git_ops.remote_set_url(&self.path, name, uri)?;
            }
            None => {
                if !first_time {
                    warn!(
                        "Subtree {} exists but remote is not configured, adding it",
                        name
                    );
                }
                self.git_ops.remote_add(&self.path, name, uri)?;
            }
        }
        Ok(())
    }

    /// Steps after the merge has started: read the subtree on first import,
    /// then commit.
    fn complete_merge(&self, name: &str, rev: &str, first_time: bool) -> Result<ImportStatus> {
        if first_time {
            self.git_ops
                .read_tree(&self.path, &format!("{}/", name), rev)?;
        } else if !self.git_ops.merge_in_progress(&self.path)? {
            info!("{} is already up to date", name);
            return Ok(ImportStatus::UpToDate);
        }

        self.git_ops.commit(&self.path, &import_message(name))?;

        Ok(if first_time {
            ImportStatus::Imported
        } else {
            ImportStatus::Refreshed
        })
    }

    /// A half-finished merge would make every later import fail, so undo it.
    fn abandon_merge(&self, name: &str) {
        match self.git_ops.merge_in_progress(&self.path) {
            Ok(true) => {
                if let Err(e) = self.git_ops.merge_abort(&self.path) {
                    warn!("Could not abort merge of {}: {}", name, e);
                }
            }
            Ok(false) => {}
            Err(e) => warn!("Could not inspect merge state after {}: {}", name, e),
        }
    }
}
