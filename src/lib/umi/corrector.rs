//! Abundance-directed UMI error correction.
//!
//! Within one group of records (normally one cell barcode) UMIs are ranked by abundance: the
//! total `num_reads` over every record carrying the UMI. A single greedy pass then walks the
//! ranking from most to least abundant. Each UMI that has not itself been corrected away claims
//! every *later* UMI within `max_distance` mismatches that has not been claimed yet. Claimed
//! UMIs are rewritten to their claimant.
//!
//! Corrections therefore always point from lower to higher abundance, a claimed UMI never
//! claims anything itself, and ties in abundance are resolved by first-seen order. Because a
//! correction target is never itself corrected, applying a correction table twice is the same
//! as applying it once.
//!
//! ```
//! use umi_collapse_lib::record::{OutcomeKey, UmiOutcome};
//! use umi_collapse_lib::umi::corrector::UmiCorrector;
//!
//! let x = OutcomeKey::new("deletion", "-3", "12:ACG");
//! let mut records = vec![
//!     UmiOutcome::new("AAAA", "GGGG", 3, x.clone(), "read:1"),
//!     UmiOutcome::new("AAAA", "GGGT", 1, x, "read:2"),
//! ];
//! let corrections = UmiCorrector::default().correct_group(&mut records).unwrap();
//! assert_eq!(corrections.get("GGGT").map(String::as_str), Some("GGGG"));
//! assert_eq!(records[1].umi, "GGGG");
//! ```

use ahash::AHashMap;
use log::trace;

use crate::errors::{CollapseError, Result};
use crate::record::UmiOutcome;
use crate::umi::distance::{DistanceMatrix, hamming_distance_matrix};

/// Default maximum number of mismatches for a UMI to be corrected.
pub const DEFAULT_MAX_UMI_DISTANCE: u32 = 1;

/// Mapping from an erroneous UMI to the UMI it is corrected to. UMIs without an entry are left
/// alone.
pub type Corrections = AHashMap<String, String>;

/// Greedy, abundance-ordered UMI corrector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UmiCorrector {
    max_distance: u32,
}

impl Default for UmiCorrector {
    fn default() -> Self {
        Self { max_distance: DEFAULT_MAX_UMI_DISTANCE }
    }
}

impl UmiCorrector {
    /// Creates a corrector allowing up to `max_distance` mismatches.
    ///
    /// # Errors
    /// Returns [`CollapseError::InvalidThreshold`] if `max_distance` is negative (or does not
    /// fit in a `u32`).
    pub fn new(max_distance: i64) -> Result<Self> {
        u32::try_from(max_distance)
            .map(|max_distance| Self { max_distance })
            .map_err(|_| CollapseError::InvalidThreshold { value: max_distance })
    }

    #[must_use]
    pub fn max_distance(&self) -> u32 {
        self.max_distance
    }

    /// Builds the correction table for `umis`, which must be unique and in descending abundance
    /// order, with `distances` computed over the same list.
    ///
    /// # Panics
    /// Panics if `distances` was not built over a list of the same length as `umis`.
    #[must_use]
    pub fn register_corrections(&self, distances: &DistanceMatrix, umis: &[String]) -> Corrections {
        assert_eq!(distances.len(), umis.len(), "distance matrix does not match the UMI list");

        let mut target: Vec<Option<usize>> = vec![None; umis.len()];
        for source in 0..umis.len() {
            if target[source].is_some() {
                continue;
            }
            let row = distances.row(source);
            for candidate in (source + 1)..umis.len() {
                if target[candidate].is_none() && row[candidate] <= self.max_distance {
                    target[candidate] = Some(source);
                }
            }
        }

        target
            .iter()
            .enumerate()
            .filter_map(|(from, to)| to.map(|to| (umis[from].clone(), umis[to].clone())))
            .collect()
    }

    /// Ranks, corrects and rewrites the UMIs of one group of records in place.
    ///
    /// Returns the corrections that were applied.
    ///
    /// # Errors
    /// Returns [`CollapseError::LengthMismatch`] if the group's UMIs differ in length.
    pub fn correct_group(&self, records: &mut [UmiOutcome]) -> Result<Corrections> {
        let umis = abundance_order(records);
        let distances = hamming_distance_matrix(&umis)?;
        let corrections = self.register_corrections(&distances, &umis);
        let rewritten = apply_corrections(records, &corrections);
        trace!("Corrected {} UMIs ({} records) out of {}", corrections.len(), rewritten, umis.len());
        Ok(corrections)
    }
}

/// Distinct UMIs of `records` in descending order of total reads.
///
/// Equal totals keep the order in which the UMIs were first seen.
#[must_use]
pub fn abundance_order(records: &[UmiOutcome]) -> Vec<String> {
    let mut index: AHashMap<&str, usize> = AHashMap::new();
    let mut totals: Vec<(&str, u64)> = Vec::new();
    for record in records {
        let slot = *index.entry(record.umi.as_str()).or_insert_with(|| {
            totals.push((record.umi.as_str(), 0));
            totals.len() - 1
        });
        totals[slot].1 += record.num_reads;
    }
    // stable: ties stay in first-seen order
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals.into_iter().map(|(umi, _)| umi.to_string()).collect()
}

/// Rewrites the UMI of every record that has an entry in `corrections`.
///
/// Returns the number of records rewritten.
pub fn apply_corrections(records: &mut [UmiOutcome], corrections: &Corrections) -> usize {
    if corrections.is_empty() {
        return 0;
    }
    let mut rewritten = 0;
    for record in records.iter_mut() {
        if let Some(corrected) = corrections.get(&record.umi) {
            record.umi.clone_from(corrected);
            rewritten += 1;
        }
    }
    rewritten
}
