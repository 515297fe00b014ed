//! Outcome collapsing.
//!
//! Every mode shares one step: within a group whose grouping key is fixed, partition the
//! records by [`OutcomeKey`] and emit one representative per outcome. The representative is the
//! single record with the most reads (the first one seen on ties), chosen *before* any
//! summation, with its `num_reads` then replaced by the partition's total.
//!
//! The three modes differ in how groups are formed and what happens afterwards:
//!
//! | Mode | Function | Group | Extra steps |
//! |------|----------|-------|-------------|
//! | A | [`collapse_umi_outcomes`] | cell, UMI | UMI correction first; keep only the max-read outcome(s) |
//! | B | [`collapse_pooled_outcomes`] | UMI, cluster id | none |
//! | C | [`collapse_cell_outcomes`] | cell | count distinct UMIs per outcome |
//!
//! Each mode applies a [`RelevancePolicy`] before grouping and returns its metrics alongside
//! the records. Co-maximal outcomes in Mode A are all emitted; resolving them is left to the
//! caller.

use ahash::{AHashMap, AHashSet};
use log::debug;
use rayon::prelude::*;

use crate::errors::{CollapseError, Result};
use crate::metrics::{CellCollapseMetrics, PooledCollapseMetrics, UmiCollapseMetrics};
use crate::record::{CellOutcome, OutcomeKey, OutcomeRecord, PooledUmiOutcome, UmiOutcome};
use crate::relevance::RelevancePolicy;
use crate::umi::{CorrectionScope, UmiCorrector};

/// Records produced by a collapsing mode together with the mode's metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Collapsed<R, M> {
    pub records: Vec<R>,
    pub metrics: M,
}

/// Settings for per-UMI collapsing (Mode A).
#[derive(Debug, Clone, PartialEq)]
pub struct UmiCollapseConfig {
    pub corrector: UmiCorrector,
    pub scope: CorrectionScope,
    pub policy: RelevancePolicy,
    /// Cells are processed on a thread pool of this size when greater than one.
    pub threads: usize,
}

impl Default for UmiCollapseConfig {
    fn default() -> Self {
        Self {
            corrector: UmiCorrector::default(),
            scope: CorrectionScope::default(),
            policy: RelevancePolicy::read_level(),
            threads: 1,
        }
    }
}

/// One outcome's records within a group.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OutcomePartition {
    /// Index of the record with the most reads, first seen on ties.
    representative: usize,
    /// Indices of every record with this outcome, in input order.
    members: Vec<usize>,
    total_reads: u64,
}

/// Partitions `group` by outcome key in first-seen order.
fn partition_by_outcome<R: OutcomeRecord>(group: &[R]) -> Vec<OutcomePartition> {
    let mut index: AHashMap<&OutcomeKey, usize> = AHashMap::new();
    let mut partitions: Vec<OutcomePartition> = Vec::new();
    for (i, record) in group.iter().enumerate() {
        let slot = *index.entry(record.outcome()).or_insert_with(|| {
            partitions.push(OutcomePartition { representative: i, members: Vec::new(), total_reads: 0 });
            partitions.len() - 1
        });
        let partition = &mut partitions[slot];
        partition.members.push(i);
        partition.total_reads += record.num_reads();
        if record.num_reads() > group[partition.representative].num_reads() {
            partition.representative = i;
        }
    }
    partitions
}

/// Collapses one group into a representative per distinct outcome, in first-seen outcome
/// order.
///
/// # Example
/// ```
/// use umi_collapse_lib::collapse::collapse_by_outcome;
/// use umi_collapse_lib::record::{OutcomeKey, UmiOutcome};
///
/// let x = OutcomeKey::new("deletion", "-3", "12:ACG");
/// let group = vec![
///     UmiOutcome::new("AAAA", "GGGG", 1, x.clone(), "read:1"),
///     UmiOutcome::new("AAAA", "GGGG", 3, x, "read:2"),
/// ];
/// let collapsed = collapse_by_outcome(&group);
/// assert_eq!(collapsed.len(), 1);
/// assert_eq!(collapsed[0].num_reads, 4);
/// assert_eq!(collapsed[0].query_name, "read:2");
/// ```
#[must_use]
pub fn collapse_by_outcome<R: OutcomeRecord>(group: &[R]) -> Vec<R> {
    partition_by_outcome(group)
        .into_iter()
        .map(|partition| {
            let mut representative = group[partition.representative].clone();
            representative.set_num_reads(partition.total_reads);
            representative
        })
        .collect()
}

/// Splits records that are sorted by `same_group` into owned runs.
fn split_runs<R>(records: Vec<R>, same_group: impl Fn(&R, &R) -> bool) -> Vec<Vec<R>> {
    let mut runs: Vec<Vec<R>> = Vec::new();
    for record in records {
        match runs.last_mut() {
            Some(run) if same_group(&run[run.len() - 1], &record) => run.push(record),
            _ => runs.push(vec![record]),
        }
    }
    runs
}

fn cell_umi_key(record: &UmiOutcome) -> (&str, &str) {
    (record.cell_barcode.as_str(), record.umi.as_str())
}

fn umi_cluster_key(record: &PooledUmiOutcome) -> (&str, &str) {
    (record.umi.as_str(), record.cluster_id.as_str())
}

fn count_distinct_umis(records: &[UmiOutcome]) -> u64 {
    records.iter().map(|r| r.umi.as_str()).collect::<AHashSet<_>>().len() as u64
}

/// Corrects the UMIs of one cell's records according to `scope`, returning the number of
/// corrections applied.
fn correct_cell(
    records: &mut [UmiOutcome],
    corrector: &UmiCorrector,
    scope: CorrectionScope,
) -> Result<u64> {
    match scope {
        CorrectionScope::Cell => Ok(corrector.correct_group(records)?.len() as u64),
        CorrectionScope::CellOutcome => {
            let mut corrected = 0;
            for partition in partition_by_outcome(records) {
                let mut subset: Vec<UmiOutcome> =
                    partition.members.iter().map(|&i| records[i].clone()).collect();
                corrected += corrector.correct_group(&mut subset)?.len() as u64;
                for (&i, record) in partition.members.iter().zip(subset) {
                    records[i].umi = record.umi;
                }
            }
            Ok(corrected)
        }
    }
}

/// Mode A for the records of a single cell, sorted by UMI.
fn collapse_cell(
    mut records: Vec<UmiOutcome>,
    config: &UmiCollapseConfig,
) -> Result<(Vec<UmiOutcome>, UmiCollapseMetrics)> {
    let mut metrics = UmiCollapseMetrics {
        relevant_records: records.len() as u64,
        relevant_reads: records.iter().map(|r| r.num_reads).sum(),
        cells: 1,
        umis_observed: count_distinct_umis(&records),
        ..UmiCollapseMetrics::default()
    };

    metrics.umis_corrected = correct_cell(&mut records, &config.corrector, config.scope)?;
    // stable: records of one UMI keep their relative order
    records.sort_by(|a, b| a.umi.cmp(&b.umi));

    let mut output = Vec::new();
    for umi_group in records.chunk_by(|a, b| a.umi == b.umi) {
        metrics.umis_after_correction += 1;
        let representatives = collapse_by_outcome(umi_group);
        let max_reads = representatives.iter().map(|r| r.num_reads).max().unwrap_or(0);
        let before = output.len();
        output.extend(representatives.into_iter().filter(|r| r.num_reads == max_reads));
        if output.len() - before > 1 {
            metrics.ambiguous_umis += 1;
        }
    }
    metrics.representative_outcomes = output.len() as u64;
    Ok((output, metrics))
}

/// Collapses read-level records to the dominant outcome(s) of each corrected (cell, UMI).
///
/// Records failing `config.policy` are dropped first. Within each cell UMIs are corrected (see
/// [`UmiCorrector`]), records are regrouped by corrected UMI and collapsed by outcome, and only
/// the outcome(s) whose summed reads equal the UMI's maximum are kept. Output is ordered by
/// cell, then UMI, then first-seen outcome.
///
/// # Errors
/// Returns [`CollapseError::LengthMismatch`] if the UMIs within one cell differ in length, and
/// [`CollapseError::InvalidParameter`] if the thread pool cannot be built.
pub fn collapse_umi_outcomes(
    records: Vec<UmiOutcome>,
    config: &UmiCollapseConfig,
) -> Result<Collapsed<UmiOutcome, UmiCollapseMetrics>> {
    let total_records = records.len() as u64;
    let (mut relevant, filtered_records) = config.policy.retain_relevant(records);

    // stable: ties keep input order
    relevant.sort_by(|a, b| cell_umi_key(a).cmp(&cell_umi_key(b)));
    let cells = split_runs(relevant, |a, b| a.cell_barcode == b.cell_barcode);
    debug!("Collapsing UMI outcomes for {} cells", cells.len());

    let per_cell: Vec<(Vec<UmiOutcome>, UmiCollapseMetrics)> = if config.threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
            .map_err(|e| CollapseError::InvalidParameter {
                parameter: "threads".to_string(),
                reason: e.to_string(),
            })?;
        pool.install(|| {
            cells.into_par_iter().map(|cell| collapse_cell(cell, config)).collect::<Result<Vec<_>>>()
        })?
    } else {
        cells.into_iter().map(|cell| collapse_cell(cell, config)).collect::<Result<Vec<_>>>()?
    };

    let mut metrics =
        UmiCollapseMetrics { total_records, filtered_records, ..UmiCollapseMetrics::default() };
    let mut output = Vec::new();
    for (cell_records, cell_metrics) in per_cell {
        metrics.merge(&cell_metrics);
        output.extend(cell_records);
    }
    Ok(Collapsed { records: output, metrics })
}

/// Collapses pooled records to one representative per outcome within each (UMI, cluster id).
///
/// No UMI correction and no maximum filtering are applied: every distinct outcome of a group
/// is emitted. Output is ordered by (UMI, cluster id), then first-seen outcome.
#[must_use]
pub fn collapse_pooled_outcomes(
    records: Vec<PooledUmiOutcome>,
    policy: &RelevancePolicy,
) -> Collapsed<PooledUmiOutcome, PooledCollapseMetrics> {
    let total_records = records.len() as u64;
    let (mut relevant, filtered_records) = policy.retain_relevant(records);
    let relevant_records = relevant.len() as u64;

    relevant.sort_by(|a, b| umi_cluster_key(a).cmp(&umi_cluster_key(b)));
    let mut groups = 0;
    let mut output = Vec::new();
    for group in relevant.chunk_by(|a, b| a.umi == b.umi && a.cluster_id == b.cluster_id) {
        groups += 1;
        output.extend(collapse_by_outcome(group));
    }

    let metrics = PooledCollapseMetrics {
        total_records,
        relevant_records,
        filtered_records,
        groups,
        representative_outcomes: output.len() as u64,
    };
    Collapsed { records: output, metrics }
}

/// Collapses (typically Mode A) records to one record per outcome within each cell.
///
/// `num_umis` counts the distinct UMIs supporting the outcome, `num_reads` sums their reads and
/// `query_name` comes from the highest-read record. Output is ordered by cell, then first-seen
/// outcome.
#[must_use]
pub fn collapse_cell_outcomes(
    records: Vec<UmiOutcome>,
    policy: &RelevancePolicy,
) -> Collapsed<CellOutcome, CellCollapseMetrics> {
    let total_records = records.len() as u64;
    let (mut relevant, filtered_records) = policy.retain_relevant(records);
    let relevant_records = relevant.len() as u64;

    relevant.sort_by(|a, b| a.cell_barcode.cmp(&b.cell_barcode));
    let mut cells = 0;
    let mut output = Vec::new();
    for cell in relevant.chunk_by(|a, b| a.cell_barcode == b.cell_barcode) {
        cells += 1;
        for partition in partition_by_outcome(cell) {
            let representative = &cell[partition.representative];
            let umis: AHashSet<&str> = partition.members.iter().map(|&i| cell[i].umi.as_str()).collect();
            output.push(CellOutcome {
                cell_barcode: representative.cell_barcode.clone(),
                num_umis: umis.len() as u64,
                num_reads: partition.total_reads,
                outcome: representative.outcome.clone(),
                query_name: representative.query_name.clone(),
            });
        }
    }

    let metrics = CellCollapseMetrics {
        total_records,
        relevant_records,
        filtered_records,
        cells,
        cell_outcomes: output.len() as u64,
    };
    Collapsed { records: output, metrics }
}
