//! End-to-end tests for the `convert-repos` command.

mod common;
use common::prelude::*;

const REPOS: &str = "\
repositories:
  ros_comm:
    type: git
    url: https://github.com/ros/ros_comm
    version: noetic-devel
  geometry2:
    type: git
    url: https://github.com/ros/geometry2.git
    version: noetic-devel
";

#[test]
fn test_convert_to_stdout() {
    let fixture = TestFixture::new();
    let repos = fixture.write("target.repos", REPOS);

    fixture
        .command()
        .arg("convert-repos")
        .arg(&repos)
        .assert()
        .success()
        .stdout(predicate::str::contains("local-name: geometry2"))
        .stdout(predicate::str::contains(
            "uri: https://github.com/ros/ros_comm.git",
        ))
        .stdout(predicate::str::contains("geometry2.git.git").not());
}

#[test]
fn test_convert_defaults_to_target_repos() {
    let fixture = TestFixture::new();
    fixture.write("target.repos", REPOS);

    fixture
        .command()
        .args(["convert-repos", "--output", "target.rosinstall"])
        .assert()
        .success();

    fixture
        .child("target.rosinstall")
        .assert(predicate::str::contains("local-name: ros_comm"));
}

#[test]
fn test_converted_list_is_accepted_by_run() {
    if !git_available() {
        return;
    }
    let fixture = TestFixture::new();
    let upstream = fixture.upstream_repo("a", &[("a.txt", "a")]);
    fixture.write(
        "target.repos",
        &format!(
            "repositories:\n  a:\n    type: git\n    url: '{}'\n    version: master\n  b:\n    type: svn\n    url: https://example.org/svn/b\n",
            upstream.display()
        ),
    );

    fixture
        .command()
        .args(["convert-repos", "--output", "target.rosinstall"])
        .assert()
        .success();

    // Local paths gain a `.git` suffix, so point the upstream there too
    std::fs::rename(&upstream, upstream.with_extension("git")).unwrap();

    fixture
        .run_command(&fixture.path().join("target.rosinstall"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1"))
        .stdout(predicate::str::contains("No errors encountered during import"));

    assert_eq!(fixture.aggregate_entries(), vec!["README", "a"]);
}

#[test]
fn test_convert_missing_file_fails() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["convert-repos", "missing.repos"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to convert"));
}

#[test]
fn test_convert_rejects_non_repos_document() {
    let fixture = TestFixture::new();
    let repos = fixture.write("broken.repos", "repositories:\n  a: [1, 2]\n");

    fixture
        .command()
        .arg("convert-repos")
        .arg(&repos)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid .repos document"));
}
