//! Custom assertion helpers for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::process::Output;

/// Asserts that the command succeeded, printing its stderr otherwise.
///
/// # Panics
///
/// Panics if the command exited with a failure status.
pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed with {:?}:\n{}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Asserts that the command failed and that its stderr mentions `needle`.
///
/// # Panics
///
/// Panics if the command succeeded or the message is missing.
pub fn assert_failure_mentions(output: &Output, needle: &str) {
    assert!(!output.status.success(), "command unexpectedly succeeded");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(needle), "stderr does not mention '{needle}':\n{stderr}");
}

/// Reads a headed TSV and returns the value of `column` in every data row.
///
/// # Panics
///
/// Panics if the file cannot be read or lacks the column.
pub fn tsv_column<P: AsRef<Path>>(path: P, column: &str) -> Vec<String> {
    let content = std::fs::read_to_string(path).expect("Failed to read TSV");
    let mut lines = content.lines();
    let header: Vec<&str> = lines.next().expect("TSV has no header").split('\t').collect();
    let index = header.iter().position(|c| *c == column).expect("TSV lacks column");
    lines.filter(|l| !l.is_empty()).map(|l| l.split('\t').nth(index).unwrap_or_default().to_string()).collect()
}
