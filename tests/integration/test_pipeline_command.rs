//! End-to-end CLI tests for the pipeline command.

use tempfile::TempDir;

use crate::helpers::{assert_success, cell_line, read_lines, run_umi_collapse, tsv_column, umi_line, write_lines};

const Y: (&str, &str, &str) = ("wild type", "clean", ".");
const X: (&str, &str, &str) = ("deletion", "-3", "12:ACG");

/// Builds reads for `cell`: `umis` distinct UMIs with `reads_per_umi` reads each.
fn reads_for(cell: &str, umis: &[&str], reads_per_umi: u64, outcome: (&str, &str, &str)) -> Vec<String> {
    umis.iter().map(|umi| umi_line(cell, umi, reads_per_umi, outcome, &format!("read:{cell}:{umi}"))).collect()
}

/// BBBB has one well-supported outcome; CCCC has two and is dropped as ambiguous.
#[test]
fn test_pipeline_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("reads.txt");
    let prefix = dir.path().join("sample");

    // UMIs pairwise at least two mismatches apart so none are corrected
    let bbbb_umis = ["AAAAAA", "CCCCCC", "GGGGGG", "TTTTTT", "AACCGG", "GGTTAA"];
    let cccc_x = ["AAAAAA", "CCCCCC", "GGGGGG", "TTTTTT", "AACCGG"];
    let cccc_y = ["GGTTAA", "TTAACC", "ACACAC", "GTGTGT", "CACACA"];
    let mut lines = Vec::new();
    lines.extend(reads_for("BBBB", &bbbb_umis[..4], 7, Y));
    lines.extend(reads_for("BBBB", &bbbb_umis[4..], 6, Y));
    lines.extend(reads_for("CCCC", &cccc_x, 6, X));
    lines.extend(reads_for("CCCC", &cccc_y, 6, Y));
    write_lines(&input, &lines);

    let result = run_umi_collapse(&[
        "pipeline",
        "-i",
        input.to_str().unwrap(),
        "-o",
        prefix.to_str().unwrap(),
    ]);
    assert_success(&result);

    let path = |suffix: &str| dir.path().join(format!("sample{suffix}"));
    assert_eq!(read_lines(path(".umi_outcomes.txt")).len(), 16);
    let cells = read_lines(path(".cell_outcomes.txt"));
    assert_eq!(cells[0], cell_line("BBBB", 6, 40, Y, "read:BBBB:AAAAAA"));
    assert_eq!(cells.len(), 3);
    assert_eq!(tsv_column(path(".coherent_cells.txt"), "cell_BC"), vec!["BBBB"]);
    assert_eq!(tsv_column(path(".umi_metrics.txt"), "cells"), vec!["2"]);
    assert_eq!(tsv_column(path(".cell_metrics.txt"), "cell_outcomes"), vec!["3"]);
    assert_eq!(tsv_column(path(".coherence_metrics.txt"), "ambiguous_cells"), vec!["1"]);
}

/// A missing output directory is reported before any work is done.
#[test]
fn test_pipeline_missing_output_directory() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("reads.txt");
    write_lines(&input, &[umi_line("AAAA", "GGGG", 3, X, "read:1")]);
    let prefix = dir.path().join("missing").join("sample");

    let result = run_umi_collapse(&["pipeline", "-i", input.to_str().unwrap(), "-o", prefix.to_str().unwrap()]);
    assert!(!result.status.success());
}
