//! Error path integration tests.
//!
//! These tests verify that malformed input, invalid parameters and inconsistent UMIs are
//! reported, both through the library and by the binary.

use tempfile::TempDir;
use umi_collapse_lib::collapse::{UmiCollapseConfig, collapse_umi_outcomes};
use umi_collapse_lib::errors::CollapseError;
use umi_collapse_lib::io::read_records;
use umi_collapse_lib::record::{CellOutcome, UmiOutcome};
use umi_collapse_lib::umi::UmiCorrector;

use crate::helpers::{assert_failure_mentions, run_umi_collapse, umi_line, write_lines};

const X: (&str, &str, &str) = ("deletion", "-3", "12:ACG");

// ==================== Library Error Paths ====================

#[test]
fn test_malformed_line_aborts_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reads.txt");
    write_lines(&path, &[umi_line("AAAA", "GGGG", 3, X, "read:1"), "AAAA\tGGGT\tmany\tdeletion\t-3\t.\tr".to_string()]);

    let err = read_records::<UmiOutcome, _>(&path).unwrap_err();
    assert!(matches!(err, CollapseError::MalformedRecord { line: 2, .. }), "unexpected error: {err}");
}

#[test]
fn test_read_level_file_is_not_a_cell_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reads.txt");
    write_lines(&path, &["AAAA\tGGGG\t3\tdeletion\t-3\t12:ACG"]);
    let err = read_records::<CellOutcome, _>(&path).unwrap_err();
    assert!(matches!(err, CollapseError::MalformedRecord { line: 1, .. }));
}

#[test]
fn test_negative_distance_is_invalid_threshold() {
    assert!(matches!(UmiCorrector::new(-2), Err(CollapseError::InvalidThreshold { value: -2 })));
}

#[test]
fn test_mixed_umi_lengths_fail_mode_a() {
    let records = vec![
        UmiOutcome::new("AAAA", "GGGG", 3, umi_collapse_lib::record::OutcomeKey::new("a", "b", "c"), "r1"),
        UmiOutcome::new("AAAA", "GGGGG", 1, umi_collapse_lib::record::OutcomeKey::new("a", "b", "c"), "r2"),
    ];
    let err = collapse_umi_outcomes(records, &UmiCollapseConfig::default()).unwrap_err();
    assert!(matches!(err, CollapseError::LengthMismatch { expected: 4, found: 5, .. }));
}

// ==================== CLI Error Paths ====================

#[test]
fn test_cli_missing_input() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.txt");
    let result = run_umi_collapse(&[
        "collapse-umis",
        "-i",
        "/nonexistent/reads.txt",
        "-o",
        output.to_str().unwrap(),
    ]);
    assert_failure_mentions(&result, "does not exist");
}

#[test]
fn test_cli_negative_distance() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("reads.txt");
    let output = dir.path().join("out.txt");
    write_lines(&input, &[umi_line("AAAA", "GGGG", 3, X, "read:1")]);
    let result = run_umi_collapse(&[
        "collapse-umis",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--max-umi-distance",
        "-1",
    ]);
    assert_failure_mentions(&result, "Invalid UMI correction distance");
}

#[test]
fn test_cli_malformed_record_reports_line() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("reads.txt");
    let output = dir.path().join("out.txt");
    write_lines(&input, &[umi_line("AAAA", "GGGG", 3, X, "read:1"), "AAAA\tGGGT\t0\tdeletion\t-3\t.\tr".to_string()]);
    let result = run_umi_collapse(&[
        "collapse-umis",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    assert_failure_mentions(&result, "line 2");
}

#[test]
fn test_cli_bad_ambiguous_outcome() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("reads.txt");
    write_lines(&input, &[umi_line("AAAA", "GGGG", 3, X, "read:1")]);
    let result = run_umi_collapse(&[
        "collapse-pooled",
        "-i",
        input.to_str().unwrap(),
        "-o",
        "-",
        "--ambiguous-outcome",
        "no indel",
    ]);
    assert_failure_mentions(&result, "category,subcategory,details");
}
