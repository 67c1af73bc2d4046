//! Thin wrappers around the system `git` binary.
//!
//! Each function runs exactly one git command inside `repo_dir`. Using the
//! system git means remote authentication (SSH keys, credential helpers,
//! tokens) works the same way it does on the command line.

use std::path::Path;

use crate::error::{Error, Result};
use crate::process;

const GIT: &str = "git";

/// `git init`
pub fn init(repo_dir: &Path) -> Result<()> {
    process::run(GIT, ["init"], Some(repo_dir))
}

/// `git add <path>`
pub fn add(repo_dir: &Path, path: &str) -> Result<()> {
    process::run(GIT, ["add", path], Some(repo_dir))
}

/// `git commit -m <message>`
pub fn commit(repo_dir: &Path, message: &str) -> Result<()> {
    process::run(GIT, ["commit", "-m", message], Some(repo_dir))
}

/// Returns true when `repo_dir` is inside a git work tree whose `HEAD`
/// resolves to a commit.
pub fn has_head_commit(repo_dir: &Path) -> Result<bool> {
    let (_, output) = process::output(
        GIT,
        ["rev-parse", "--quiet", "--verify", "HEAD^{commit}"],
        Some(repo_dir),
    )?;
    Ok(output.status.success())
}

/// Read `remote.<name>.url` from the repository config.
///
/// Returns `None` when no such remote is configured (`git config` exits
/// with status 1 for a missing key).
pub fn remote_url(repo_dir: &Path, name: &str) -> Result<Option<String>> {
    let key = format!("remote.{}.url", name);
    let (command, output) = process::output(GIT, ["config", "--get", key.as_str()], Some(repo_dir))?;

    if output.status.code() == Some(1) {
        return Ok(None);
    }
    if !output.status.success() {
        return Err(Error::CommandFailed {
            command,
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let url = String::from_utf8(output.stdout).map_err(|e| Error::UnexpectedOutput {
        command: command.clone(),
        message: format!("remote URL is not valid UTF-8: {}", e),
    })?;
    let url = url.trim_end().to_string();
    if url.is_empty() {
        return Err(Error::UnexpectedOutput {
            command,
            message: "remote URL is empty".to_string(),
        });
    }
    Ok(Some(url))
}

/// `git remote add -- <name> <url>`
pub fn remote_add(repo_dir: &Path, name: &str, url: &str) -> Result<()> {
    process::run(GIT, ["remote", "add", "--", name, url], Some(repo_dir))
}

/// `git remote set-url -- <name> <url>`
pub fn remote_set_url(repo_dir: &Path, name: &str, url: &str) -> Result<()> {
    process::run(GIT, ["remote", "set-url", "--", name, url], Some(repo_dir))
}

/// Namespace under which the tags of remote `name` are stored.
pub fn remote_tags_prefix(name: &str) -> String {
    format!("refs/remotes/{}/tags", name)
}

/// Fetch branches and tags of remote `name`.
///
/// Branches land in `refs/remotes/<name>/` as usual. Tags land in
/// [`remote_tags_prefix`] instead of the shared `refs/tags/`, since many
/// upstreams reuse the same tag names.
pub fn fetch(repo_dir: &Path, name: &str) -> Result<()> {
    let branches = format!("+refs/heads/*:refs/remotes/{}/*", name);
    let tags = format!("+refs/tags/*:{}/*", remote_tags_prefix(name));
    process::run(
        GIT,
        ["fetch", "--no-tags", "--", name, branches.as_str(), tags.as_str()],
        Some(repo_dir),
    )
}

/// Resolve `rev` to a commit id, or `None` if it names no commit.
pub fn resolve_commit(repo_dir: &Path, rev: &str) -> Result<Option<String>> {
    let revision = format!("{}^{{commit}}", rev);
    let (command, output) = process::output(
        GIT,
        ["rev-parse", "--quiet", "--verify", revision.as_str()],
        Some(repo_dir),
    )?;
    if !output.status.success() {
        return Ok(None);
    }
    let id = String::from_utf8(output.stdout).map_err(|e| Error::UnexpectedOutput {
        command,
        message: format!("commit id is not valid UTF-8: {}", e),
    })?;
    Ok(Some(id.trim().to_string()))
}

/// Merge `rev` keeping the current tree as-is and without committing.
///
/// `--allow-unrelated-histories` is needed on the first import, where the
/// upstream history shares no ancestor with the aggregate.
pub fn merge_ours_no_commit(repo_dir: &Path, rev: &str) -> Result<()> {
    process::run(
        GIT,
        [
            "merge",
            "-s",
            "ours",
            "--no-commit",
            "--allow-unrelated-histories",
            rev,
        ],
        Some(repo_dir),
    )
}

/// Returns true while a merge is pending a commit (`MERGE_HEAD` exists).
pub fn merge_in_progress(repo_dir: &Path) -> Result<bool> {
    let (_, output) = process::output(
        GIT,
        ["rev-parse", "--quiet", "--verify", "MERGE_HEAD"],
        Some(repo_dir),
    )?;
    Ok(output.status.success())
}

/// `git merge --abort`
pub fn merge_abort(repo_dir: &Path) -> Result<()> {
    process::run(GIT, ["merge", "--abort"], Some(repo_dir))
}

/// `git read-tree --prefix=<prefix> -u <rev>`
pub fn read_tree_prefix(repo_dir: &Path, prefix: &str, rev: &str) -> Result<()> {
    let prefix_arg = format!("--prefix={}", prefix);
    process::run(
        GIT,
        ["read-tree", prefix_arg.as_str(), "-u", rev],
        Some(repo_dir),
    )
}
