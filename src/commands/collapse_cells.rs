//! Collapsing of per-UMI records to per-cell outcomes.

use anyhow::{Context, Result};
use clap::Parser;

use umi_collapse_lib::collapse::collapse_cell_outcomes;
use umi_collapse_lib::io::{read_records, write_records};
use umi_collapse_lib::logging::{OperationTimer, log_cell_collapse_summary};
use umi_collapse_lib::record::UmiOutcome;

use crate::commands::command::Command;
use crate::commands::common::{MetricsOptions, RecordIoOptions, RelevanceOptions, RelevancePreset, log_policy};

/// Collapses per-UMI records to one record per outcome within each cell.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "collapse-cells",
    author,
    version,
    about = "\x1b[38;5;30m[COLLAPSING]\x1b[0m \x1b[36mCollapse per-UMI outcomes per cell\x1b[0m",
    long_about = r#"
Collapses per-UMI outcome records (normally the output of `collapse-umis`) to one record per
outcome within each cell.

Input columns:

    cell_BC  UMI  num_reads  category  subcategory  details  query_name

Output columns:

    cell_BC  num_UMIs  num_reads  category  subcategory  details  query_name

`num_UMIs` counts the distinct UMIs supporting the outcome in the cell, `num_reads` sums their
reads, and `query_name` is taken from the supporting record with the most reads.

By default records with category `bad sequence` or `endogenous`, and the ambiguous no-call
outcome, are dropped first.
"#
)]
pub struct CollapseCells {
    /// Input/output record files
    #[command(flatten)]
    pub io: RecordIoOptions,

    /// Relevance policy options
    #[command(flatten)]
    pub relevance: RelevanceOptions,

    /// Metrics output options
    #[command(flatten)]
    pub metrics: MetricsOptions,
}

impl Command for CollapseCells {
    fn execute(&self) -> Result<()> {
        self.io.validate()?;
        let policy = self.relevance.to_policy(RelevancePreset::CellLevel);

        let timer = OperationTimer::new("Collapsing cell outcomes");
        log_policy(&policy);

        let records: Vec<UmiOutcome> = read_records(&self.io.input)
            .with_context(|| format!("Failed to read records from {}", self.io.input.display()))?;
        let collapsed = collapse_cell_outcomes(records, &policy);

        write_records(&self.io.output, &collapsed.records)
            .with_context(|| format!("Failed to write records to {}", self.io.output.display()))?;
        self.metrics.write(&collapsed.metrics)?;

        log_cell_collapse_summary(&collapsed.metrics);
        timer.log_completion(collapsed.metrics.total_records);
        Ok(())
    }
}
