//! Metrics for the coherent-cell filter.

use serde::{Deserialize, Serialize};

use crate::{Metric, ProcessingMetrics};

/// Counts describing how many cells survived the coherence filter and why the rest did not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoherenceMetrics {
    /// Cell-level records examined
    pub input_records: u64,
    /// Records meeting both the UMI count and reads-per-UMI thresholds
    pub passing_records: u64,
    /// Distinct cell barcodes among the input records
    pub cells_observed: u64,
    /// Cells with at least one passing record
    pub cells_passing: u64,
    /// Cells with exactly one passing record
    pub coherent_cells: u64,
    /// Cells dropped because two or more outcomes passed
    pub ambiguous_cells: u64,
}

impl Metric for CoherenceMetrics {
    fn metric_name() -> &'static str {
        "cell coherence"
    }
}

impl ProcessingMetrics for CoherenceMetrics {
    fn total_input(&self) -> u64 {
        self.input_records
    }

    fn total_output(&self) -> u64 {
        self.coherent_cells
    }

    fn total_filtered(&self) -> u64 {
        self.input_records - self.passing_records
    }
}
