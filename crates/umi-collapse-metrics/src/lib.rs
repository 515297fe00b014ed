#![deny(unsafe_code)]

//! Structured metric types and TSV writer for umi-collapse operations.
//!
//! This crate provides:
//! - [`Metric`] and [`ProcessingMetrics`] traits shared by every metric type
//! - [`collapse`] metrics for the per-UMI, pooled and per-cell collapsing modes
//! - [`coherence`] metrics for the coherent-cell filter
//! - [`writer`] for TSV file output

pub mod coherence;
pub mod collapse;
pub mod writer;

use serde::{Deserialize, Serialize};

/// Formats a count with thousands separators.
///
/// # Example
/// ```
/// use umi_collapse_metrics::format_count;
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// assert_eq!(format_count(12), "12");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// A metric type that can be serialized to TSV files.
pub trait Metric: Serialize + for<'de> Deserialize<'de> + Clone + Default {
    /// Human-readable name for this metric type, used in error messages and logs.
    fn metric_name() -> &'static str;
}

/// Common interface for metrics that track how many items went in, came out, or were dropped.
pub trait ProcessingMetrics {
    /// Total number of input records.
    fn total_input(&self) -> u64;

    /// Total number of output records.
    fn total_output(&self) -> u64;

    /// Number of input records excluded before aggregation.
    fn total_filtered(&self) -> u64;

    /// Fraction of input records surviving the relevance filter, as a percentage.
    fn retention(&self) -> f64 {
        if self.total_input() == 0 {
            0.0
        } else {
            #[expect(clippy::cast_precision_loss, reason = "record counts never exceed 2^53")]
            let kept = (self.total_input() - self.total_filtered()) as f64;
            #[expect(clippy::cast_precision_loss, reason = "record counts never exceed 2^53")]
            let total = self.total_input() as f64;
            kept / total * 100.0
        }
    }
}

pub use coherence::CoherenceMetrics;
pub use collapse::{CellCollapseMetrics, PooledCollapseMetrics, UmiCollapseMetrics};
pub use writer::write_metrics;
