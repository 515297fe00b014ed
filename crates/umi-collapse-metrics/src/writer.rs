//! Utilities for writing metrics files.

use anyhow::{Context, Result};
use fgoxide::io::DelimFile;
use serde::Serialize;
use std::path::Path;

use super::Metric;

/// Write metrics to a TSV file with consistent error messages.
///
/// # Errors
/// Returns an error if the file cannot be created or written to.
///
/// # Example
/// ```no_run
/// use umi_collapse_metrics::writer::write_metrics;
/// use umi_collapse_metrics::CoherenceMetrics;
///
/// let metrics = vec![CoherenceMetrics::default()];
/// write_metrics("coherence.txt", &metrics, "coherence").unwrap();
/// ```
pub fn write_metrics<P: AsRef<Path>, T: Serialize>(
    path: P,
    metrics: &[T],
    description: &str,
) -> Result<()> {
    let path_ref = path.as_ref();
    DelimFile::default()
        .write_tsv(&path_ref, metrics)
        .with_context(|| format!("Failed to write {} metrics: {}", description, path_ref.display()))
}

/// Write a single [`Metric`] as a one-row TSV, naming it by [`Metric::metric_name`].
///
/// # Errors
/// Returns an error if the file cannot be created or written to.
pub fn write_metric<P: AsRef<Path>, T: Metric>(path: P, metric: &T) -> Result<()> {
    write_metrics(path, std::slice::from_ref(metric), T::metric_name())
}
