#![deny(unsafe_code)]

//! DNA utilities for UMI comparison.
//!
//! This crate provides a 2-bit packed representation of short UMI sequences so that
//! Hamming distances can be computed with a handful of bit operations instead of a
//! byte-by-byte scan.

pub mod packed;

pub use packed::{MAX_PACKED_LEN, PackedUmi};

/// Counts the number of positions at which two equal-length byte sequences differ.
///
/// Comparison is exact (case-sensitive, `N` is an ordinary symbol). Callers are responsible
/// for checking that the sequences have the same length.
#[inline]
#[must_use]
pub fn count_mismatches(a: &[u8], b: &[u8]) -> u32 {
    debug_assert_eq!(a.len(), b.len(), "Sequences must have equal length");
    let mut mismatches = 0u32;
    for (x, y) in a.iter().zip(b.iter()) {
        if x != y {
            mismatches += 1;
        }
    }
    mismatches
}
