//! Cell coherence filtering.
//!
//! A cell's call is trusted only when exactly one of its outcomes is well supported: enough
//! distinct UMIs and enough reads per UMI. Cells with no such outcome are dropped, as are cells
//! with more than one (ambiguous cells).

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{CollapseError, Result};
use crate::metrics::CoherenceMetrics;
use crate::record::CellOutcome;
use crate::validation::validate_non_negative;

/// Default minimum reads per supporting UMI.
pub const DEFAULT_MIN_READS_PER_UMI: f64 = 5.0;

/// Default minimum number of supporting UMIs.
pub const DEFAULT_MIN_NUM_UMIS: u64 = 5;

/// Support required for a cell-level record to count as passing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoherenceThresholds {
    pub min_reads_per_umi: f64,
    pub min_num_umis: u64,
}

impl Default for CoherenceThresholds {
    fn default() -> Self {
        Self { min_reads_per_umi: DEFAULT_MIN_READS_PER_UMI, min_num_umis: DEFAULT_MIN_NUM_UMIS }
    }
}

impl CoherenceThresholds {
    /// # Errors
    /// Returns [`CollapseError::InvalidParameter`] if `min_reads_per_umi` is negative or not
    /// finite.
    pub fn validate(&self) -> Result<()> {
        validate_non_negative(self.min_reads_per_umi, "min-reads-per-umi")
    }
}

/// The single passing record of a coherent cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoherentCell {
    #[serde(rename = "cell_BC")]
    pub cell_barcode: String,
    #[serde(rename = "num_UMIs")]
    pub num_umis: u64,
    pub num_reads: u64,
    pub category: String,
    pub subcategory: String,
    pub details: String,
    pub query_name: String,
    #[serde(rename = "reads_per_UMI")]
    pub reads_per_umi: f64,
}

impl CoherentCell {
    fn from_record(record: &CellOutcome, reads_per_umi: f64) -> Self {
        Self {
            cell_barcode: record.cell_barcode.clone(),
            num_umis: record.num_umis,
            num_reads: record.num_reads,
            category: record.outcome.category.clone(),
            subcategory: record.outcome.subcategory.clone(),
            details: record.outcome.details.clone(),
            query_name: record.query_name.clone(),
            reads_per_umi,
        }
    }
}

/// Coherent cells keyed (and therefore ordered) by barcode.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoherentCells {
    pub cells: BTreeMap<String, CoherentCell>,
    pub metrics: CoherenceMetrics,
}

impl CoherentCells {
    /// The coherent cells as rows in barcode order.
    #[must_use]
    pub fn into_rows(self) -> Vec<CoherentCell> {
        self.cells.into_values().collect()
    }
}

/// Keeps the cells whose records contain exactly one outcome passing `thresholds`.
///
/// # Errors
/// Returns [`CollapseError::InvalidParameter`] for invalid thresholds and
/// [`CollapseError::DivisionGuard`] for any record with zero UMIs.
///
/// # Example
/// ```
/// use umi_collapse_lib::coherence::{CoherenceThresholds, filter_coherent_cells};
/// use umi_collapse_lib::record::{CellOutcome, OutcomeKey};
///
/// let record = CellOutcome {
///     cell_barcode: "BBBB".to_string(),
///     num_umis: 6,
///     num_reads: 40,
///     outcome: OutcomeKey::new("deletion", "-3", "12:ACG"),
///     query_name: "read:9".to_string(),
/// };
/// let coherent = filter_coherent_cells(&[record], &CoherenceThresholds::default()).unwrap();
/// assert!(coherent.cells.contains_key("BBBB"));
/// ```
pub fn filter_coherent_cells(
    records: &[CellOutcome],
    thresholds: &CoherenceThresholds,
) -> Result<CoherentCells> {
    thresholds.validate()?;

    let mut observed: BTreeSet<&str> = BTreeSet::new();
    let mut passing: BTreeMap<&str, Vec<CoherentCell>> = BTreeMap::new();
    let mut passing_records = 0;
    for record in records {
        let reads_per_umi = record
            .reads_per_umi()
            .ok_or_else(|| CollapseError::DivisionGuard { cell_barcode: record.cell_barcode.clone() })?;
        observed.insert(record.cell_barcode.as_str());
        if reads_per_umi >= thresholds.min_reads_per_umi && record.num_umis >= thresholds.min_num_umis {
            passing_records += 1;
            passing
                .entry(record.cell_barcode.as_str())
                .or_default()
                .push(CoherentCell::from_record(record, reads_per_umi));
        }
    }

    let cells_passing = passing.len() as u64;
    let mut cells = BTreeMap::new();
    let mut ambiguous_cells = 0;
    for (barcode, mut survivors) in passing {
        match survivors.pop() {
            Some(cell) if survivors.is_empty() => {
                cells.insert(barcode.to_string(), cell);
            }
            _ => ambiguous_cells += 1,
        }
    }
    debug!("{} coherent cells, {} ambiguous", cells.len(), ambiguous_cells);

    let metrics = CoherenceMetrics {
        input_records: records.len() as u64,
        passing_records,
        cells_observed: observed.len() as u64,
        cells_passing,
        coherent_cells: cells.len() as u64,
        ambiguous_cells,
    };
    Ok(CoherentCells { cells, metrics })
}
