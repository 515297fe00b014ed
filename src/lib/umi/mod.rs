//! UMI error correction.
//!
//! - [`distance`]: pairwise Hamming distance matrices
//! - [`corrector`]: greedy abundance-ordered correction over one group of records

use std::fmt;

use clap::ValueEnum;

pub mod corrector;
pub mod distance;

pub use corrector::{Corrections, DEFAULT_MAX_UMI_DISTANCE, UmiCorrector, abundance_order, apply_corrections};
pub use distance::{DistanceMatrix, hamming_distance_matrix};

/// Which records share a UMI ranking during correction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum CorrectionScope {
    /// All records of a cell are corrected together.
    #[default]
    Cell,
    /// Each (cell, outcome) partition is corrected on its own, so a UMI is only merged into a
    /// more abundant UMI carrying the same outcome.
    CellOutcome,
}

impl fmt::Display for CorrectionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell => write!(f, "cell"),
            Self::CellOutcome => write!(f, "cell-outcome"),
        }
    }
}
