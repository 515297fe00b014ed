//! Pairwise Hamming distances between the UMIs of one group.
//!
//! This is the quadratic hot path of UMI correction: one matrix per cell over its distinct
//! UMIs (typically tens to low hundreds). The matrix is stored as a single flat `Vec<u32>` of
//! N×N entries.
//!
//! When every UMI packs into a [`PackedUmi`] the distances are computed with XOR/popcount;
//! otherwise (e.g. UMIs containing `N`, or longer than 32 bases) bytes are compared directly.
//! Both paths give identical results.

use umi_collapse_dna::{PackedUmi, count_mismatches};

use crate::errors::{CollapseError, Result};

/// A symmetric N×N matrix of Hamming distances with a zero diagonal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DistanceMatrix {
    n: usize,
    values: Vec<u32>,
}

impl DistanceMatrix {
    /// Number of sequences the matrix was built over.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between sequence `i` and sequence `j`.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> u32 {
        assert!(i < self.n && j < self.n, "index ({i}, {j}) out of bounds for {}x{}", self.n, self.n);
        self.values[i * self.n + j]
    }

    /// Row `i` of the matrix.
    #[must_use]
    pub fn row(&self, i: usize) -> &[u32] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    fn filled(n: usize, distance: impl Fn(usize, usize) -> u32) -> Self {
        let mut values = vec![0u32; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = distance(i, j);
                values[i * n + j] = d;
                values[j * n + i] = d;
            }
        }
        Self { n, values }
    }
}

/// Computes the Hamming distance matrix over `umis`, in the given order.
///
/// # Errors
/// Returns [`CollapseError::LengthMismatch`] if the UMIs do not all have the length of the
/// first one.
///
/// # Example
/// ```
/// use umi_collapse_lib::umi::distance::hamming_distance_matrix;
///
/// let ds = hamming_distance_matrix(&["GGGG", "GGGT", "AAAA"]).unwrap();
/// assert_eq!(ds.get(0, 1), 1);
/// assert_eq!(ds.get(2, 0), 4);
/// assert_eq!(ds.get(1, 1), 0);
/// ```
pub fn hamming_distance_matrix<S: AsRef<str>>(umis: &[S]) -> Result<DistanceMatrix> {
    let Some(first) = umis.first() else {
        return Ok(DistanceMatrix::default());
    };
    let expected = first.as_ref().len();
    if let Some(bad) = umis.iter().map(AsRef::as_ref).find(|u| u.len() != expected) {
        return Err(CollapseError::LengthMismatch {
            umi: bad.to_string(),
            expected,
            found: bad.len(),
        });
    }

    let n = umis.len();
    let matrix = match PackedUmi::pack_all(umis) {
        Some(packed) => DistanceMatrix::filled(n, |i, j| packed[i].mismatches(&packed[j])),
        None => DistanceMatrix::filled(n, |i, j| {
            count_mismatches(umis[i].as_ref().as_bytes(), umis[j].as_ref().as_bytes())
        }),
    };
    Ok(matrix)
}
