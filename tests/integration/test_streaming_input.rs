//! Tests for reading records from stdin and writing them to stdout.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::helpers::umi_line;

const X: (&str, &str, &str) = ("deletion", "-3", "12:ACG");

#[test]
fn test_collapse_umis_stdin_to_stdout() {
    let input = format!("{}\n{}\n", umi_line("AAAA", "GGGG", 3, X, "read:1"), umi_line("AAAA", "GGGT", 1, X, "read:2"));

    let mut child = Command::new(env!("CARGO_BIN_EXE_umi-collapse"))
        .args(["collapse-umis", "-i", "-", "-o", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn umi-collapse");
    child.stdin.take().expect("stdin").write_all(input.as_bytes()).expect("Failed to write stdin");
    let output = child.wait_with_output().expect("Failed to wait for umi-collapse");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, format!("{}\n", umi_line("AAAA", "GGGG", 4, X, "read:1")));
}
