//! Per-UMI collapsing with UMI error correction.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use umi_collapse_lib::collapse::{UmiCollapseConfig, collapse_umi_outcomes};
use umi_collapse_lib::io::{read_records, write_records};
use umi_collapse_lib::logging::{OperationTimer, log_umi_collapse_summary};
use umi_collapse_lib::record::UmiOutcome;
use umi_collapse_lib::umi::{CorrectionScope, DEFAULT_MAX_UMI_DISTANCE, UmiCorrector};

use crate::commands::command::Command;
use crate::commands::common::{
    MetricsOptions, RecordIoOptions, RelevanceOptions, RelevancePreset, ThreadingOptions, log_policy,
};

/// Corrects UMIs and collapses read-level outcome records to one call per (cell, UMI).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "collapse-umis",
    author,
    version,
    about = "\x1b[38;5;30m[COLLAPSING]\x1b[0m \x1b[36mCorrect UMIs and collapse read-level outcomes per (cell, UMI)\x1b[0m",
    long_about = r#"
Corrects UMIs within each cell and collapses read-level outcome records to the dominant outcome
of each (cell, UMI).

Input and output are headerless, tab-delimited record files with the columns:

    cell_BC  UMI  num_reads  category  subcategory  details  query_name

## UMI Correction

Within a cell, UMIs are ranked by their total number of reads. Walking the ranking from the most
abundant UMI down, each UMI that has not itself been corrected absorbs every less abundant,
not-yet-absorbed UMI within `--max-umi-distance` mismatches. UMIs must all have the same length
within a cell.

With `--correction-scope cell-outcome`, ranking and correction happen separately for each outcome
within a cell, so a UMI is only ever merged into a UMI carrying the same outcome.

## Collapsing

After correction, the records of each (cell, UMI) are collapsed to one record per outcome: the
highest-read record is chosen as the representative and its read count is replaced by the total
for that outcome. Only the outcome(s) with the most reads are written; when several outcomes tie
they are all written.

## Relevance

Records with category `bad sequence` and the ambiguous no-call outcome
(`no indel,other,ambiguous`) are dropped before anything else. See `--exclude-category`,
`--ambiguous-outcome`, `--keep-ambiguous` and `--no-relevance-filter`.
"#
)]
pub struct CollapseUmis {
    /// Input/output record files
    #[command(flatten)]
    pub io: RecordIoOptions,

    /// Maximum mismatches for a UMI to be corrected to a more abundant UMI
    #[arg(short = 'd', long = "max-umi-distance", default_value_t = i64::from(DEFAULT_MAX_UMI_DISTANCE), allow_negative_numbers = true)]
    pub max_umi_distance: i64,

    /// Which records share a UMI ranking during correction
    #[arg(long = "correction-scope", value_enum, default_value_t = CorrectionScope::default())]
    pub correction_scope: CorrectionScope,

    /// Relevance policy options
    #[command(flatten)]
    pub relevance: RelevanceOptions,

    /// Metrics output options
    #[command(flatten)]
    pub metrics: MetricsOptions,

    /// Threading options
    #[command(flatten)]
    pub threading: ThreadingOptions,
}

impl CollapseUmis {
    /// Builds the library configuration from the command-line options.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative UMI distance or zero threads.
    pub fn config(&self) -> Result<UmiCollapseConfig> {
        self.threading.validate()?;
        Ok(UmiCollapseConfig {
            corrector: UmiCorrector::new(self.max_umi_distance)?,
            scope: self.correction_scope,
            policy: self.relevance.to_policy(RelevancePreset::ReadLevel),
            threads: self.threading.threads,
        })
    }
}

impl Command for CollapseUmis {
    fn execute(&self) -> Result<()> {
        self.io.validate()?;
        let config = self.config()?;

        let timer = OperationTimer::new("Collapsing UMI outcomes");
        log_policy(&config.policy);
        info!(
            "Correcting UMIs within {} mismatches (scope: {})",
            config.corrector.max_distance(),
            config.scope
        );
        info!("{}", self.threading.log_message());

        let records: Vec<UmiOutcome> = read_records(&self.io.input)
            .with_context(|| format!("Failed to read records from {}", self.io.input.display()))?;
        let collapsed = collapse_umi_outcomes(records, &config)?;

        write_records(&self.io.output, &collapsed.records)
            .with_context(|| format!("Failed to write records to {}", self.io.output.display()))?;
        self.metrics.write(&collapsed.metrics)?;

        log_umi_collapse_summary(&collapsed.metrics);
        timer.log_completion(collapsed.metrics.total_records);
        Ok(())
    }
}
