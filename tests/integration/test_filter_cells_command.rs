//! End-to-end CLI tests for the filter-cells command.

use tempfile::TempDir;

use crate::helpers::{assert_failure_mentions, assert_success, cell_line, run_umi_collapse, tsv_column, write_lines};

const X: (&str, &str, &str) = ("deletion", "-3", "12:ACG");
const Y: (&str, &str, &str) = ("insertion", "+1", "20:T");

/// A single well-supported outcome is kept; two passing outcomes or too few UMIs drop a cell.
#[test]
fn test_filter_cells_basic() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("cells.txt");
    let output = dir.path().join("coherent.txt");
    let metrics = dir.path().join("metrics.txt");
    write_lines(
        &input,
        &[
            cell_line("BBBB", 6, 40, Y, "read:1"),
            cell_line("CCCC", 5, 30, X, "read:2"),
            cell_line("CCCC", 5, 30, Y, "read:3"),
            cell_line("DDDD", 4, 400, X, "read:4"),
        ],
    );

    let result = run_umi_collapse(&[
        "filter-cells",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--metrics",
        metrics.to_str().unwrap(),
    ]);
    assert_success(&result);
    assert_eq!(tsv_column(&output, "cell_BC"), vec!["BBBB"]);
    assert_eq!(tsv_column(&output, "category"), vec!["insertion"]);
    assert_eq!(tsv_column(&metrics, "ambiguous_cells"), vec!["1"]);
    assert_eq!(tsv_column(&metrics, "cells_observed"), vec!["3"]);
}

/// Lowered thresholds admit the low-UMI cell.
#[test]
fn test_filter_cells_custom_thresholds() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("cells.txt");
    let output = dir.path().join("coherent.txt");
    write_lines(&input, &[cell_line("DDDD", 4, 8, X, "read:4")]);

    let result = run_umi_collapse(&[
        "filter-cells",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--min-umis",
        "2",
        "--min-reads-per-umi",
        "2",
    ]);
    assert_success(&result);
    assert_eq!(tsv_column(&output, "cell_BC"), vec!["DDDD"]);
    assert_eq!(tsv_column(&output, "reads_per_UMI")[0].parse::<f64>().unwrap(), 2.0);
}

/// A record with zero UMIs aborts the run, even when other cells are well supported.
#[test]
fn test_filter_cells_zero_umis_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("cells.txt");
    let output = dir.path().join("coherent.txt");
    write_lines(&input, &[cell_line("BBBB", 6, 40, Y, "read:1"), cell_line("EEEE", 0, 0, X, "read:5")]);

    let result = run_umi_collapse(&[
        "filter-cells",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    assert_failure_mentions(&result, "Cell 'EEEE' has a cell-level record with zero UMIs");
    assert!(!output.exists());
}
