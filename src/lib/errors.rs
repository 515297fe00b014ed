//! Custom error types for umi-collapse operations.

use thiserror::Error;

/// Result type alias for umi-collapse operations
pub type Result<T> = std::result::Result<T, CollapseError>;

/// Error type for umi-collapse operations
#[derive(Error, Debug)]
pub enum CollapseError {
    /// A record line could not be parsed
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number within the input
        line: u64,
        /// Explanation of the problem
        reason: String,
    },

    /// UMIs of differing length were compared
    #[error("UMI '{umi}' has length {found} but the other UMIs in its group have length {expected}")]
    LengthMismatch {
        /// The offending UMI
        umi: String,
        /// Length of the first UMI in the group
        expected: usize,
        /// Length of the offending UMI
        found: usize,
    },

    /// Negative UMI correction distance
    #[error("Invalid UMI correction distance: {value} (must be >= 0)")]
    InvalidThreshold {
        /// The rejected distance
        value: i64,
    },

    /// A cell-level record with zero supporting UMIs reached the coherence filter
    #[error("Cell '{cell_barcode}' has a cell-level record with zero UMIs")]
    DivisionGuard {
        /// Barcode of the offending cell
        cell_barcode: String,
    },

    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// I/O failure on a record stream
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path (or `-`) of the stream
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl CollapseError {
    /// Shorthand for a [`CollapseError::MalformedRecord`].
    #[cold]
    pub fn malformed(line: u64, reason: impl Into<String>) -> Self {
        Self::MalformedRecord { line, reason: reason.into() }
    }
}
