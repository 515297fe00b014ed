//! Metrics collection and reporting for umi-collapse operations.
//!
//! This module re-exports the `umi-collapse-metrics` crate:
//! - [`collapse`] - Metrics for the three collapsing modes
//! - [`coherence`] - Coherent-cell filter metrics
//! - [`writer`] - Metrics file I/O utilities

pub use umi_collapse_metrics::{Metric, ProcessingMetrics, format_count};

pub use umi_collapse_metrics::coherence;
pub use umi_collapse_metrics::collapse;
pub use umi_collapse_metrics::writer;

pub use coherence::CoherenceMetrics;
pub use collapse::{CellCollapseMetrics, PooledCollapseMetrics, UmiCollapseMetrics};
pub use writer::{write_metric, write_metrics};
