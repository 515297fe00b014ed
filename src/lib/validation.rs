//! Input validation utilities
//!
//! Checks for command-line parameters and file paths, reported through
//! [`CollapseError::InvalidParameter`] with consistent messages.

use std::fmt::Display;
use std::path::Path;

use crate::errors::{CollapseError, Result};
use crate::io::is_stdio_path;
use crate::record::OutcomeKey;

fn invalid(parameter: &str, reason: String) -> CollapseError {
    CollapseError::InvalidParameter { parameter: parameter.to_string(), reason }
}

/// Validate that a file exists. `-` (stdin) always passes.
///
/// # Errors
/// Returns an error if the file does not exist.
///
/// # Example
/// ```
/// use umi_collapse_lib::validation::validate_file_exists;
///
/// assert!(validate_file_exists("/nonexistent/outcomes.txt", "Input file").is_err());
/// assert!(validate_file_exists("-", "Input file").is_ok());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path = path.as_ref();
    if !is_stdio_path(path) && !path.exists() {
        return Err(invalid(description, format!("File does not exist: {}", path.display())));
    }
    Ok(())
}

/// Validate that the directory an output prefix writes into exists.
///
/// # Errors
/// Returns an error if the parent directory of `prefix` is missing.
pub fn validate_output_prefix<P: AsRef<Path>>(prefix: P) -> Result<()> {
    let prefix = prefix.as_ref();
    match prefix.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => Err(invalid(
            "output prefix",
            format!("Directory does not exist: {}", dir.display()),
        )),
        _ => Ok(()),
    }
}

/// Validate that a value is strictly positive.
///
/// # Errors
/// Returns an error if `value` is zero or less.
///
/// ```
/// use umi_collapse_lib::validation::validate_positive;
///
/// assert!(validate_positive(4usize, "threads").is_ok());
/// assert!(validate_positive(0usize, "threads").is_err());
/// ```
pub fn validate_positive<T: Ord + Display + Default>(value: T, name: &str) -> Result<()> {
    if value <= T::default() {
        return Err(invalid(name, format!("Must be positive (> 0), got: {value}")));
    }
    Ok(())
}

/// Validate that a float is finite and not negative.
///
/// # Errors
/// Returns an error for negative, infinite or NaN values.
pub fn validate_non_negative(value: f64, name: &str) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(name, format!("Must be a finite value >= 0, got: {value}")));
    }
    Ok(())
}

/// Parses an outcome given on the command line as `category,subcategory,details`.
///
/// # Errors
/// Returns an error unless the value has exactly three comma-separated parts.
///
/// ```
/// use umi_collapse_lib::validation::parse_outcome_key;
///
/// let key = parse_outcome_key("no indel,other,ambiguous").unwrap();
/// assert_eq!(key.details, "ambiguous");
/// assert!(parse_outcome_key("no indel").is_err());
/// ```
pub fn parse_outcome_key(value: &str) -> Result<OutcomeKey> {
    OutcomeKey::parse_triple(value).ok_or_else(|| {
        invalid("outcome", format!("Expected 'category,subcategory,details', got: '{value}'"))
    })
}
