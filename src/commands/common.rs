//! Common CLI options shared across commands.
//!
//! This module provides shared argument structures that can be composed into
//! command structs using `#[command(flatten)]`.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::Args;
use log::info;

use umi_collapse_lib::io::is_stdio_path;
use umi_collapse_lib::metrics::{Metric, write_metric};
use umi_collapse_lib::record::OutcomeKey;
use umi_collapse_lib::relevance::{BAD_SEQUENCE_CATEGORY, ENDOGENOUS_CATEGORY, RelevancePolicy, ambiguous_no_call};
use umi_collapse_lib::validation::{parse_outcome_key, validate_file_exists, validate_positive};

/// Common input/output options for commands that read one record file and write another.
#[derive(Debug, Clone, Args)]
pub struct RecordIoOptions {
    /// Input record file (`-` for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output file (`-` for stdout)
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

impl RecordIoOptions {
    /// Validates that the input file exists (skipped for stdin) and differs from the output.
    ///
    /// # Errors
    ///
    /// Returns an error if the input file does not exist or is also the output file.
    pub fn validate(&self) -> Result<()> {
        validate_file_exists(&self.input, "Input file")?;
        if !is_stdio_path(&self.input) && self.input == self.output {
            bail!("Input and output must be different files: {}", self.input.display());
        }
        Ok(())
    }
}

/// Which set of default exclusions a command starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelevancePreset {
    ReadLevel,
    CellLevel,
}

/// Options controlling which records take part in aggregation.
///
/// Without any option the command's own preset applies: read-level commands exclude
/// `bad sequence` records, cell-level commands additionally exclude `endogenous` records, and
/// both exclude the ambiguous no-call outcome.
#[derive(Debug, Clone, Default, Args)]
pub struct RelevanceOptions {
    /// Outcome categories to exclude, replacing the preset's categories (repeatable)
    #[arg(long = "exclude-category", value_name = "CATEGORY")]
    pub exclude_categories: Vec<String>,

    /// Outcome to treat as an ambiguous no-call, as `category,subcategory,details`
    #[arg(long = "ambiguous-outcome", value_name = "OUTCOME", value_parser = parse_outcome_key)]
    pub ambiguous_outcome: Option<OutcomeKey>,

    /// Keep ambiguous no-call records
    #[arg(long = "keep-ambiguous", default_value_t = false, conflicts_with = "ambiguous_outcome")]
    pub keep_ambiguous: bool,

    /// Disable the relevance filter entirely
    #[arg(long = "no-relevance-filter", default_value_t = false)]
    pub no_relevance_filter: bool,
}

impl RelevanceOptions {
    /// Builds the policy for a command whose defaults are `preset`.
    #[must_use]
    pub fn to_policy(&self, preset: RelevancePreset) -> RelevancePolicy {
        if self.no_relevance_filter {
            return RelevancePolicy::permissive();
        }
        let categories: Vec<String> = if self.exclude_categories.is_empty() {
            match preset {
                RelevancePreset::ReadLevel => vec![BAD_SEQUENCE_CATEGORY.to_string()],
                RelevancePreset::CellLevel => {
                    vec![BAD_SEQUENCE_CATEGORY.to_string(), ENDOGENOUS_CATEGORY.to_string()]
                }
            }
        } else {
            self.exclude_categories.clone()
        };
        let ambiguous = if self.keep_ambiguous {
            None
        } else {
            Some(self.ambiguous_outcome.clone().unwrap_or_else(ambiguous_no_call))
        };
        RelevancePolicy::new(categories, ambiguous)
    }
}

/// Logs the exclusions a policy applies.
pub fn log_policy(policy: &RelevancePolicy) {
    let categories = policy.excluded_categories();
    if categories.is_empty() {
        info!("Excluding no outcome categories");
    } else {
        info!("Excluding outcome categories: {}", categories.join(", "));
    }
    match policy.ambiguous_outcome() {
        Some(key) => info!("Excluding ambiguous outcome: {key}"),
        None => info!("Keeping ambiguous outcomes"),
    }
}

/// Options for writing metrics to a file.
#[derive(Debug, Clone, Default, Args)]
pub struct MetricsOptions {
    /// Optional output file for metrics
    #[arg(short = 'm', long = "metrics")]
    pub metrics: Option<PathBuf>,
}

impl MetricsOptions {
    /// Writes `metric` if a metrics path was given.
    ///
    /// # Errors
    ///
    /// Returns an error if the metrics file cannot be written.
    pub fn write<T: Metric>(&self, metric: &T) -> Result<()> {
        if let Some(path) = &self.metrics {
            write_metrics_file(path, metric)?;
        }
        Ok(())
    }
}

/// Writes one metric row to `path` and logs where it went.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_metrics_file<T: Metric>(path: &Path, metric: &T) -> Result<()> {
    write_metric(path, metric)?;
    info!("Wrote {} metrics to {}", T::metric_name(), path.display());
    Ok(())
}

/// Threading options for commands that can process cells in parallel.
#[derive(Debug, Clone, Args)]
pub struct ThreadingOptions {
    /// Number of threads used to process cells
    #[arg(short = 't', long = "threads", default_value_t = 1)]
    pub threads: usize,
}

impl Default for ThreadingOptions {
    fn default() -> Self {
        Self { threads: 1 }
    }
}

impl ThreadingOptions {
    /// Creates options for `threads` threads.
    #[must_use]
    pub fn new(threads: usize) -> Self {
        Self { threads }
    }

    /// # Errors
    ///
    /// Returns an error if `threads` is zero.
    pub fn validate(&self) -> Result<()> {
        validate_positive(self.threads, "threads")?;
        Ok(())
    }

    /// Human-readable description for logging.
    #[must_use]
    pub fn log_message(&self) -> String {
        if self.threads > 1 { format!("Using {} threads", self.threads) } else { "Using 1 thread".to_string() }
    }
}
