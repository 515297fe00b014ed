//! Metrics for the collapsing commands.

use serde::{Deserialize, Serialize};

use crate::{Metric, ProcessingMetrics};

/// Metrics for per-UMI collapsing with UMI error correction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UmiCollapseMetrics {
    /// Read-level records loaded
    pub total_records: u64,
    /// Records passing the relevance filter
    pub relevant_records: u64,
    /// Records excluded by the relevance filter
    pub filtered_records: u64,
    /// Reads summed over relevant records
    pub relevant_reads: u64,
    /// Distinct cell barcodes among relevant records
    pub cells: u64,
    /// Distinct (cell, UMI) pairs before correction
    pub umis_observed: u64,
    /// UMIs rewritten to a more abundant neighbour
    pub umis_corrected: u64,
    /// Distinct (cell, UMI) pairs after correction
    pub umis_after_correction: u64,
    /// Representative outcomes emitted
    pub representative_outcomes: u64,
    /// UMIs emitting more than one co-maximal outcome
    pub ambiguous_umis: u64,
}

impl UmiCollapseMetrics {
    /// Folds the counts of one independently processed cell into `self`.
    pub fn merge(&mut self, other: &Self) {
        self.total_records += other.total_records;
        self.relevant_records += other.relevant_records;
        self.filtered_records += other.filtered_records;
        self.relevant_reads += other.relevant_reads;
        self.cells += other.cells;
        self.umis_observed += other.umis_observed;
        self.umis_corrected += other.umis_corrected;
        self.umis_after_correction += other.umis_after_correction;
        self.representative_outcomes += other.representative_outcomes;
        self.ambiguous_umis += other.ambiguous_umis;
    }
}

impl Metric for UmiCollapseMetrics {
    fn metric_name() -> &'static str {
        "UMI collapse"
    }
}

impl ProcessingMetrics for UmiCollapseMetrics {
    fn total_input(&self) -> u64 {
        self.total_records
    }

    fn total_output(&self) -> u64 {
        self.representative_outcomes
    }

    fn total_filtered(&self) -> u64 {
        self.filtered_records
    }
}

/// Metrics for pooled (UMI x cluster) collapsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PooledCollapseMetrics {
    /// Pooled records loaded
    pub total_records: u64,
    /// Records passing the relevance filter
    pub relevant_records: u64,
    /// Records excluded by the relevance filter
    pub filtered_records: u64,
    /// Distinct (UMI, cluster) groups
    pub groups: u64,
    /// Representative outcomes emitted
    pub representative_outcomes: u64,
}

impl Metric for PooledCollapseMetrics {
    fn metric_name() -> &'static str {
        "pooled collapse"
    }
}

impl ProcessingMetrics for PooledCollapseMetrics {
    fn total_input(&self) -> u64 {
        self.total_records
    }

    fn total_output(&self) -> u64 {
        self.representative_outcomes
    }

    fn total_filtered(&self) -> u64 {
        self.filtered_records
    }
}

/// Metrics for per-cell collapsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCollapseMetrics {
    /// UMI-level records loaded
    pub total_records: u64,
    /// Records passing the relevance filter
    pub relevant_records: u64,
    /// Records excluded by the relevance filter
    pub filtered_records: u64,
    /// Distinct cell barcodes
    pub cells: u64,
    /// Cell-level outcome records emitted
    pub cell_outcomes: u64,
}

impl Metric for CellCollapseMetrics {
    fn metric_name() -> &'static str {
        "cell collapse"
    }
}

impl ProcessingMetrics for CellCollapseMetrics {
    fn total_input(&self) -> u64 {
        self.total_records
    }

    fn total_output(&self) -> u64 {
        self.cell_outcomes
    }

    fn total_filtered(&self) -> u64 {
        self.filtered_records
    }
}
