//! End-to-end CLI tests for the collapse-cells command.

use tempfile::TempDir;

use crate::helpers::{assert_success, cell_line, read_lines, run_umi_collapse, umi_line, write_lines};

const X: (&str, &str, &str) = ("deletion", "-3", "12:ACG");

/// Distinct UMIs are counted per outcome and off-target records are excluded.
#[test]
fn test_collapse_cells_counts_umis() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("umis.txt");
    let output = dir.path().join("cells.txt");
    write_lines(
        &input,
        &[
            umi_line("CCCC", "AAAA", 4, X, "read:4"),
            umi_line("BBBB", "AAAA", 5, X, "read:1"),
            umi_line("BBBB", "CCCC", 9, X, "read:2"),
            umi_line("BBBB", "GGGG", 50, ("endogenous", "wt", "."), "read:3"),
        ],
    );

    let result = run_umi_collapse(&[
        "collapse-cells",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    assert_success(&result);
    assert_eq!(
        read_lines(&output),
        vec![cell_line("BBBB", 2, 14, X, "read:2"), cell_line("CCCC", 1, 4, X, "read:4")]
    );
}

/// Replacing the excluded categories keeps endogenous records.
#[test]
fn test_collapse_cells_custom_exclusions() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("umis.txt");
    let output = dir.path().join("cells.txt");
    write_lines(&input, &[umi_line("BBBB", "GGGG", 50, ("endogenous", "wt", "."), "read:3")]);

    let result = run_umi_collapse(&[
        "collapse-cells",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--exclude-category",
        "bad sequence",
    ]);
    assert_success(&result);
    assert_eq!(read_lines(&output), vec![cell_line("BBBB", 1, 50, ("endogenous", "wt", "."), "read:3")]);
}
