//! End-to-end CLI tests for the collapse-umis command.

use tempfile::TempDir;

use crate::helpers::{assert_success, read_lines, run_umi_collapse, tsv_column, umi_line, write_lines};

const X: (&str, &str, &str) = ("deletion", "-3", "12:ACG");
const Y: (&str, &str, &str) = ("insertion", "+1", "20:T");

/// A one-mismatch UMI is folded into its more abundant neighbour.
#[test]
fn test_collapse_umis_corrects_neighbour() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("reads.txt");
    let output = dir.path().join("umis.txt");
    write_lines(&input, &[umi_line("AAAA", "GGGG", 3, X, "read:1"), umi_line("AAAA", "GGGT", 1, X, "read:2")]);

    let result = run_umi_collapse(&[
        "collapse-umis",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    assert_success(&result);
    assert_eq!(read_lines(&output), vec![umi_line("AAAA", "GGGG", 4, X, "read:1")]);
}

/// With a zero distance nothing is corrected.
#[test]
fn test_collapse_umis_zero_distance() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("reads.txt");
    let output = dir.path().join("umis.txt");
    write_lines(&input, &[umi_line("AAAA", "GGGG", 3, X, "read:1"), umi_line("AAAA", "GGGT", 1, X, "read:2")]);

    let result = run_umi_collapse(&[
        "collapse-umis",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--max-umi-distance",
        "0",
    ]);
    assert_success(&result);
    assert_eq!(
        read_lines(&output),
        vec![umi_line("AAAA", "GGGG", 3, X, "read:1"), umi_line("AAAA", "GGGT", 1, X, "read:2")]
    );
}

/// Co-maximal outcomes are both written and counted as ambiguous.
#[test]
fn test_collapse_umis_keeps_ties_and_writes_metrics() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("reads.txt");
    let output = dir.path().join("umis.txt");
    let metrics = dir.path().join("metrics.txt");
    write_lines(
        &input,
        &[
            umi_line("AAAA", "GGGG", 2, X, "read:1"),
            umi_line("AAAA", "GGGG", 2, Y, "read:2"),
            umi_line("AAAA", "CCCC", 1, ("bad sequence", "", ""), "read:3"),
        ],
    );

    let result = run_umi_collapse(&[
        "collapse-umis",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--metrics",
        metrics.to_str().unwrap(),
    ]);
    assert_success(&result);
    assert_eq!(
        read_lines(&output),
        vec![umi_line("AAAA", "GGGG", 2, X, "read:1"), umi_line("AAAA", "GGGG", 2, Y, "read:2")]
    );
    assert_eq!(tsv_column(&metrics, "total_records"), vec!["3"]);
    assert_eq!(tsv_column(&metrics, "filtered_records"), vec!["1"]);
    assert_eq!(tsv_column(&metrics, "ambiguous_umis"), vec!["1"]);
}

/// Per-outcome correction scope keeps UMIs with different outcomes apart.
#[test]
fn test_collapse_umis_cell_outcome_scope() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("reads.txt");
    let output = dir.path().join("umis.txt");
    write_lines(&input, &[umi_line("AAAA", "GGGG", 3, X, "read:1"), umi_line("AAAA", "GGGT", 1, Y, "read:2")]);

    let result = run_umi_collapse(&[
        "collapse-umis",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--correction-scope",
        "cell-outcome",
    ]);
    assert_success(&result);
    assert_eq!(read_lines(&output).len(), 2);
}

/// Multi-threaded output matches the single-threaded run.
#[test]
fn test_collapse_umis_threads_are_deterministic() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("reads.txt");
    let mut lines = Vec::new();
    for (c, cell) in ["AAAA", "CCCC", "GGGG", "TTTT"].iter().enumerate() {
        for (u, umi) in ["ACGT", "ACGA", "TTTT", "TTTA", "GCGC"].iter().enumerate() {
            let outcome = if (c + u) % 2 == 0 { X } else { Y };
            lines.push(umi_line(cell, umi, (u + 1) as u64, outcome, &format!("read:{c}:{u}")));
        }
    }
    write_lines(&input, &lines);

    let single = dir.path().join("single.txt");
    let multi = dir.path().join("multi.txt");
    for (out, threads) in [(&single, "1"), (&multi, "4")] {
        let result = run_umi_collapse(&[
            "collapse-umis",
            "-i",
            input.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--threads",
            threads,
        ]);
        assert_success(&result);
    }
    assert_eq!(read_lines(&single), read_lines(&multi));
}
