//! Shared test utilities for integration and E2E tests.
//!
//! This module provides fixtures for building throwaway upstream git
//! repositories, writing manifests, and running the `repo-aggregate` binary
//! with a deterministic git identity.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     if !git_available() {
//!         return;
//!     }
//!     let fixture = TestFixture::new();
//!     let upstream = fixture.upstream_repo("a", &[("README.md", "a")]);
//!     // ... test code
//! }
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;

use assert_fs::prelude::*;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{git_available, rosinstall, TestFixture};
}

const IDENTITY: [(&str, &str); 4] = [
    ("GIT_AUTHOR_NAME", "Aggregate Tester"),
    ("GIT_AUTHOR_EMAIL", "tester@example.com"),
    ("GIT_COMMITTER_NAME", "Aggregate Tester"),
    ("GIT_COMMITTER_EMAIL", "tester@example.com"),
];

/// Returns `true` when a usable `git` binary is on `PATH`.
///
/// Tests that need real repositories return early when it is not.
#[allow(dead_code)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Render a rosinstall list from `(kind, local-name, uri, version)` tuples.
#[allow(dead_code)]
pub fn rosinstall(entries: &[(&str, &str, &str, &str)]) -> String {
    if entries.is_empty() {
        return "[]\n".to_string();
    }
    entries
        .iter()
        .map(|(kind, name, uri, version)| {
            format!(
                "- {}:\n    local-name: {}\n    uri: '{}'\n    version: '{}'\n",
                kind, name, uri, version
            )
        })
        .collect()
}

/// A temporary directory holding upstream repositories, manifests and the
/// aggregate.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the aggregate repository used by [`Self::run_command`].
    pub fn aggregate_path(&self) -> PathBuf {
        self.path().join("aggregate")
    }

    /// Path of the analysis output directory used by [`Self::run_command`].
    pub fn output_path(&self) -> PathBuf {
        self.path().join("output")
    }

    /// Get a child path of the temporary directory, for `assert_fs`
    /// assertions.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Write a file relative to the fixture root.
    pub fn write(&self, path: &str, content: &str) -> PathBuf {
        let child = self.temp_dir.child(path);
        child.write_str(content).expect("Failed to write file");
        child.path().to_path_buf()
    }

    /// Run git in `dir` with the test identity, panicking on failure.
    pub fn git(&self, dir: &Path, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .envs(IDENTITY)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Create an upstream repository on branch `master` with one commit
    /// containing `files`.
    pub fn upstream_repo(&self, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = self.path().join("upstream").join(name);
        std::fs::create_dir_all(&dir).expect("Failed to create upstream dir");
        self.git(&dir, &["init"]);
        self.git(&dir, &["symbolic-ref", "HEAD", "refs/heads/master"]);
        for (path, content) in files {
            let file = dir.join(path);
            if let Some(parent) = file.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create parent dir");
            }
            std::fs::write(file, content).expect("Failed to write upstream file");
        }
        self.git(&dir, &["add", "."]);
        self.git(&dir, &["commit", "-m", "Initial upstream commit"]);
        dir
    }

    /// Commit subjects of the aggregate, newest first.
    pub fn aggregate_log(&self) -> Vec<String> {
        self.git(&self.aggregate_path(), &["log", "--format=%s"])
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Sorted top-level entries of the aggregate, excluding `.git`.
    pub fn aggregate_entries(&self) -> Vec<String> {
        let mut entries: Vec<String> = std::fs::read_dir(self.aggregate_path())
            .expect("Failed to read aggregate")
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name != ".git")
            .collect();
        entries.sort();
        entries
    }

    /// A `repo-aggregate` command running in the fixture directory with the
    /// test git identity.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("repo-aggregate");
        cmd.current_dir(self.path()).envs(IDENTITY);
        cmd
    }

    /// `run` against `manifest` with the fixture's aggregate and output
    /// paths and no-op statistics tools.
    pub fn run_command(&self, manifest: &Path) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("--color=never")
            .arg("run")
            .arg("--quiet")
            .arg("--rosinstall-file")
            .arg(manifest)
            .arg("--aggregate-repo-path")
            .arg(self.aggregate_path())
            .arg("--output-dir")
            .arg(self.output_path())
            .args(["--gitstats", "true", "--cloc", "true", "--sloccount", "true"]);
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rosinstall_is_valid_yaml() {
        let yaml = rosinstall(&[("git", "a", "/tmp/a", "master"), ("svn", "b", "/tmp/b", "1")]);
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value.as_sequence().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_rosinstall() {
        assert_eq!(rosinstall(&[]), "[]\n");
    }
}
