//! Relevance policies.
//!
//! A [`RelevancePolicy`] decides which outcome records are informative enough to take part in
//! aggregation. Every collapsing function takes the policy explicitly, so the same aggregation
//! code serves pipelines with different exclusion rules.

use ahash::AHashSet;

use crate::record::{OutcomeKey, OutcomeRecord};

/// Category assigned to reads whose sequence could not be classified.
pub const BAD_SEQUENCE_CATEGORY: &str = "bad sequence";

/// Category assigned to off-target (background) reads.
pub const ENDOGENOUS_CATEGORY: &str = "endogenous";

/// The ambiguous no-call outcome.
#[must_use]
pub fn ambiguous_no_call() -> OutcomeKey {
    OutcomeKey::new("no indel", "other", "ambiguous")
}

/// Exclusion rules applied before any aggregation.
///
/// A record is excluded if its category is one of `excluded_categories`, or if its whole outcome
/// key equals `ambiguous_outcome`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelevancePolicy {
    excluded_categories: AHashSet<String>,
    ambiguous_outcome: Option<OutcomeKey>,
}

impl RelevancePolicy {
    /// A policy that excludes nothing.
    #[must_use]
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Builds a policy from explicit exclusions.
    #[must_use]
    pub fn new<I, S>(excluded_categories: I, ambiguous_outcome: Option<OutcomeKey>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_categories: excluded_categories.into_iter().map(Into::into).collect(),
            ambiguous_outcome,
        }
    }

    /// Defaults for read-level and pooled collapsing: drop unclassifiable reads and ambiguous
    /// no-calls.
    #[must_use]
    pub fn read_level() -> Self {
        Self::new([BAD_SEQUENCE_CATEGORY], Some(ambiguous_no_call()))
    }

    /// Defaults for cell-level collapsing: additionally drop off-target reads.
    #[must_use]
    pub fn cell_level() -> Self {
        Self::new([BAD_SEQUENCE_CATEGORY, ENDOGENOUS_CATEGORY], Some(ambiguous_no_call()))
    }

    /// True if `outcome` may take part in aggregation.
    #[must_use]
    pub fn is_relevant_outcome(&self, outcome: &OutcomeKey) -> bool {
        !self.excluded_categories.contains(&outcome.category)
            && self.ambiguous_outcome.as_ref() != Some(outcome)
    }

    /// True if `record` may take part in aggregation.
    #[must_use]
    pub fn is_relevant<R: OutcomeRecord>(&self, record: &R) -> bool {
        self.is_relevant_outcome(record.outcome())
    }

    /// Splits `records` into the relevant ones (input order kept) and the number excluded.
    #[must_use]
    pub fn retain_relevant<R: OutcomeRecord>(&self, records: Vec<R>) -> (Vec<R>, u64) {
        let total = records.len();
        let kept: Vec<R> = records.into_iter().filter(|r| self.is_relevant(r)).collect();
        let excluded = (total - kept.len()) as u64;
        (kept, excluded)
    }

    /// The excluded categories, sorted for display.
    #[must_use]
    pub fn excluded_categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.excluded_categories.iter().map(String::as_str).collect();
        categories.sort_unstable();
        categories
    }

    #[must_use]
    pub fn ambiguous_outcome(&self) -> Option<&OutcomeKey> {
        self.ambiguous_outcome.as_ref()
    }
}
