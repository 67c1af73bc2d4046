//! End-to-end tests for the `authors` command.

mod common;
use common::prelude::*;

#[test]
fn test_authors_writes_csv_for_available_years() {
    let fixture = TestFixture::new();
    fixture.write("reports/mergestat_2010.json", r#"{"uniqueAuthors": 12}"#);
    fixture.write(
        "reports/mergestat_2012.json",
        r#"{"uniqueAuthors": 30, "commits": 812}"#,
    );
    fixture.write("reports/mergestat_2011.json", "not json");

    fixture
        .command()
        .args([
            "authors",
            "--input-dir",
            "reports",
            "--from",
            "2010",
            "--to",
            "2012",
            "--output",
            "authors.csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 of 3 years"));

    fixture
        .child("authors.csv")
        .assert("year, unique_authors\n2010, 12\n2012, 30\n");
}

#[test]
fn test_authors_with_no_reports_writes_header_only() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["authors", "--from", "2020", "--to", "2021"])
        .assert()
        .success();

    fixture
        .child("unique_authors.csv")
        .assert("year, unique_authors\n");
}

#[test]
fn test_authors_rejects_reversed_range() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["authors", "--from", "2022", "--to", "2008"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Empty year range"));
}
