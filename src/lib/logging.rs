//! Formatted logging helpers.
//!
//! Number formatting plus one summary logger per stage, so every command reports its results
//! in the same layout.

use std::time::{Duration, Instant};

use crate::metrics::{
    CellCollapseMetrics, CoherenceMetrics, PooledCollapseMetrics, ProcessingMetrics, UmiCollapseMetrics,
    format_count,
};

/// Formats a fraction (0.0-1.0) as a percentage with `decimals` decimal places.
///
/// ```
/// use umi_collapse_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// assert_eq!(format_percent(1.0, 0), "100%");
/// ```
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0)
}

/// Formats a duration as e.g. `45s`, `2m 15s` or `1h 30m`.
///
/// ```
/// use umi_collapse_lib::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(135)), "2m 15s");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (major, minor, units) = match secs {
        0..60 => return format!("{secs}s"),
        60..3600 => (secs / 60, secs % 60, ("m", "s")),
        _ => (secs / 3600, (secs % 3600) / 60, ("h", "m")),
    };
    if minor == 0 {
        format!("{major}{}", units.0)
    } else {
        format!("{major}{} {minor}{}", units.0, units.1)
    }
}

/// Formats a processing rate in records per second, or per minute when slower than one per
/// second.
///
/// ```
/// use umi_collapse_lib::logging::format_rate;
/// use std::time::Duration;
///
/// assert_eq!(format_rate(2500, Duration::from_secs(2)), "1,250 records/s");
/// ```
#[must_use]
pub fn format_rate(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} records/s", format_count(count));
    }
    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} records/s", format_count(rate as u64))
    } else {
        format!("{:.1} records/min", rate * 60.0)
    }
}

fn fraction(part: u64, whole: u64) -> Option<f64> {
    if whole == 0 { None } else { Some(part as f64 / whole as f64) }
}

fn log_relevance<M: ProcessingMetrics>(metrics: &M) {
    log::info!("  Input records: {}", format_count(metrics.total_input()));
    log::info!("  Excluded by relevance policy: {}", format_count(metrics.total_filtered()));
    if metrics.total_input() > 0 {
        log::info!("  Retained: {:.2}%", metrics.retention());
    }
}

/// Logs the outcome of per-UMI collapsing.
pub fn log_umi_collapse_summary(metrics: &UmiCollapseMetrics) {
    log::info!("UMI Collapse Summary:");
    log_relevance(metrics);
    log::info!("  Relevant reads: {}", format_count(metrics.relevant_reads));
    log::info!("  Cells: {}", format_count(metrics.cells));
    log::info!(
        "  UMIs: {} observed, {} corrected, {} after correction",
        format_count(metrics.umis_observed),
        format_count(metrics.umis_corrected),
        format_count(metrics.umis_after_correction)
    );
    log::info!("  Representative outcomes: {}", format_count(metrics.representative_outcomes));
    if let Some(f) = fraction(metrics.ambiguous_umis, metrics.umis_after_correction) {
        log::info!(
            "  UMIs with co-maximal outcomes: {} ({})",
            format_count(metrics.ambiguous_umis),
            format_percent(f, 2)
        );
    }
}

/// Logs the outcome of pooled collapsing.
pub fn log_pooled_summary(metrics: &PooledCollapseMetrics) {
    log::info!("Pooled Collapse Summary:");
    log_relevance(metrics);
    log::info!("  UMI x cluster groups: {}", format_count(metrics.groups));
    log::info!("  Representative outcomes: {}", format_count(metrics.representative_outcomes));
}

/// Logs the outcome of per-cell collapsing.
pub fn log_cell_collapse_summary(metrics: &CellCollapseMetrics) {
    log::info!("Cell Collapse Summary:");
    log_relevance(metrics);
    log::info!("  Cells: {}", format_count(metrics.cells));
    log::info!("  Cell outcomes: {}", format_count(metrics.cell_outcomes));
}

/// Logs the outcome of the coherent-cell filter.
pub fn log_coherence_summary(metrics: &CoherenceMetrics) {
    log::info!("Coherence Filter Summary:");
    log::info!("  Cell records: {}", format_count(metrics.input_records));
    log::info!("  Passing records: {}", format_count(metrics.passing_records));
    log::info!("  Cells observed: {}", format_count(metrics.cells_observed));
    log::info!("  Cells with a passing record: {}", format_count(metrics.cells_passing));
    log::info!("  Dropped as ambiguous: {}", format_count(metrics.ambiguous_cells));
    match fraction(metrics.coherent_cells, metrics.cells_observed) {
        Some(f) => log::info!("  Coherent cells: {} ({})", format_count(metrics.coherent_cells), format_percent(f, 2)),
        None => log::info!("  Coherent cells: 0"),
    }
}

/// Times an operation and logs its completion with a record rate.
///
/// ```no_run
/// use umi_collapse_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Collapsing UMI outcomes");
/// // ... do work ...
/// timer.log_completion(10_000);
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Starts the timer and logs the start of `operation`.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    pub fn log_completion(&self, count: u64) {
        let duration = self.start_time.elapsed();
        log::info!(
            "{} completed: {} records in {} ({})",
            self.operation,
            format_count(count),
            format_duration(duration),
            format_rate(count, duration)
        );
    }
}
