//! Builders for record files and a runner for the `umi-collapse` binary.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

/// One read-level (or per-UMI) line: `cell UMI reads category subcategory details query`.
pub fn umi_line(cell: &str, umi: &str, reads: u64, outcome: (&str, &str, &str), query: &str) -> String {
    format!("{cell}\t{umi}\t{reads}\t{}\t{}\t{}\t{query}", outcome.0, outcome.1, outcome.2)
}

/// One pooled line: `UMI cluster reads category subcategory details`.
pub fn pooled_line(umi: &str, cluster: &str, reads: u64, outcome: (&str, &str, &str)) -> String {
    format!("{umi}\t{cluster}\t{reads}\t{}\t{}\t{}", outcome.0, outcome.1, outcome.2)
}

/// One per-cell line: `cell UMIs reads category subcategory details query`.
pub fn cell_line(cell: &str, umis: u64, reads: u64, outcome: (&str, &str, &str), query: &str) -> String {
    format!("{cell}\t{umis}\t{reads}\t{}\t{}\t{}\t{query}", outcome.0, outcome.1, outcome.2)
}

/// Writes `lines` to `path`, newline-terminated.
pub fn write_lines<P: AsRef<Path>, S: AsRef<str>>(path: P, lines: &[S]) {
    let mut content = String::new();
    for line in lines {
        content.push_str(line.as_ref());
        content.push('\n');
    }
    fs::write(path, content).expect("Failed to write record file");
}

/// Reads the non-empty lines of `path`.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read output file")
        .lines()
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Runs `umi-collapse` with `args`.
pub fn run_umi_collapse(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_umi-collapse"))
        .args(args)
        .output()
        .expect("Failed to run umi-collapse")
}
