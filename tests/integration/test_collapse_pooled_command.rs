//! End-to-end CLI tests for the collapse-pooled command.

use tempfile::TempDir;

use crate::helpers::{assert_success, pooled_line, read_lines, run_umi_collapse, tsv_column, write_lines};

const X: (&str, &str, &str) = ("deletion", "-3", "12:ACG");
const Y: (&str, &str, &str) = ("insertion", "+1", "20:T");

/// Every outcome of a group is written with summed reads, groups in (UMI, cluster) order.
#[test]
fn test_collapse_pooled_sums_without_max_filter() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pooled.txt");
    let output = dir.path().join("collapsed.txt");
    let metrics = dir.path().join("metrics.txt");
    write_lines(
        &input,
        &[
            pooled_line("GGGG", "c2", 1, X),
            pooled_line("GGGG", "c1", 2, X),
            pooled_line("GGGG", "c1", 7, Y),
            pooled_line("GGGG", "c1", 3, X),
            pooled_line("GGGG", "c1", 1, ("no indel", "other", "ambiguous")),
        ],
    );

    let result = run_umi_collapse(&[
        "collapse-pooled",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "-m",
        metrics.to_str().unwrap(),
    ]);
    assert_success(&result);
    assert_eq!(
        read_lines(&output),
        vec![pooled_line("GGGG", "c1", 5, X), pooled_line("GGGG", "c1", 7, Y), pooled_line("GGGG", "c2", 1, X)]
    );
    assert_eq!(tsv_column(&metrics, "groups"), vec!["2"]);
    assert_eq!(tsv_column(&metrics, "filtered_records"), vec!["1"]);
}

/// Similar UMIs are not corrected in pooled mode.
#[test]
fn test_collapse_pooled_does_not_correct() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pooled.txt");
    let output = dir.path().join("collapsed.txt");
    write_lines(&input, &[pooled_line("GGGG", "c1", 5, X), pooled_line("GGGT", "c1", 1, X)]);

    let result = run_umi_collapse(&[
        "collapse-pooled",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    assert_success(&result);
    assert_eq!(read_lines(&output).len(), 2);
}
