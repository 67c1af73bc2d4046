//! Exit status tests for the `repo-aggregate` binary.
//!
//! Argument errors are reported by clap with status 2, fatal run errors with
//! status 1. Per-repository import failures never change the status; those
//! are covered in `cli_e2e_run.rs`.

mod common;
use common::prelude::*;

#[test]
fn test_help_and_version_succeed() {
    cargo_bin_cmd!("repo-aggregate")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("convert-repos"));

    cargo_bin_cmd!("repo-aggregate")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_run_help_lists_options() {
    cargo_bin_cmd!("repo-aggregate")
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--rosinstall-file"))
        .stdout(predicate::str::contains("--analyze-only"))
        .stdout(predicate::str::contains("--skip-analysis"));
}

#[test]
fn test_rosinstall_file_conflicts_with_metapackage() {
    let fixture = TestFixture::new();
    let manifest = fixture.write("a.rosinstall", &rosinstall(&[]));

    fixture
        .command()
        .args(["run", "--metapackage", "desktop", "--rosinstall-file"])
        .arg(&manifest)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_missing_rosinstall_file_is_rejected() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["run", "--rosinstall-file", "missing.rosinstall"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));

    assert!(!fixture.aggregate_path().exists());
}

#[test]
fn test_analyze_only_conflicts_with_skip_analysis() {
    cargo_bin_cmd!("repo-aggregate")
        .args(["run", "--analyze-only", "--skip-analysis"])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_subcommand_fails() {
    cargo_bin_cmd!("repo-aggregate")
        .arg("frobnicate")
        .assert()
        .code(2);
}

#[test]
fn test_missing_statistics_tool_is_fatal() {
    let fixture = TestFixture::new();
    fixture.write("aggregate/README", "placeholder");

    fixture
        .command()
        .args(["run", "--quiet", "--analyze-only", "--aggregate-repo-path"])
        .arg(fixture.aggregate_path())
        .arg("--output-dir")
        .arg(fixture.output_path())
        .args(["--gitstats", "repo-aggregate-no-such-gitstats"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Command not found"))
        .stderr(predicate::str::contains("repo-aggregate-no-such-gitstats"));
}

#[test]
fn test_missing_generator_is_fatal() {
    if !git_available() {
        return;
    }
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["run", "--quiet", "--skip-analysis", "--aggregate-repo-path"])
        .arg(fixture.aggregate_path())
        .args(["--generator", "repo-aggregate-no-such-generator"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Command not found"));
}

#[test]
fn test_malformed_manifest_is_fatal() {
    if !git_available() {
        return;
    }
    let fixture = TestFixture::new();
    let manifest = fixture.write("bad.rosinstall", "just a string\n");

    fixture
        .run_command(&manifest)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Manifest parsing error"));
}
