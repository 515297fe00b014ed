//! Collapsing of records pooled by (UMI, cluster id).

use anyhow::{Context, Result};
use clap::Parser;

use umi_collapse_lib::collapse::collapse_pooled_outcomes;
use umi_collapse_lib::io::{read_records, write_records};
use umi_collapse_lib::logging::{OperationTimer, log_pooled_summary};
use umi_collapse_lib::record::PooledUmiOutcome;

use crate::commands::command::Command;
use crate::commands::common::{MetricsOptions, RecordIoOptions, RelevanceOptions, RelevancePreset, log_policy};

/// Collapses pooled records to one representative per outcome within each (UMI, cluster id).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "collapse-pooled",
    author,
    version,
    about = "\x1b[38;5;30m[COLLAPSING]\x1b[0m \x1b[36mCollapse outcomes per (UMI, cluster id)\x1b[0m",
    long_about = r#"
Collapses records that were pooled across a pre-existing clustering (for example an upstream
UMI clustering) rather than per cell.

Input and output are headerless, tab-delimited record files with the columns:

    UMI  cluster_id  num_reads  category  subcategory  details

Records are grouped by (UMI, cluster_id) and each group is collapsed to one record per distinct
outcome, with the read counts of that outcome summed. No UMI correction is performed and every
outcome of a group is written, not only the most abundant one.

Records with category `bad sequence` and the ambiguous no-call outcome are dropped first.
"#
)]
pub struct CollapsePooled {
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

impl Command for CollapsePooled {
    fn execute(&self) -> Result<()> {
        self.io.validate()?;
        let policy = self.relevance.to_policy(RelevancePreset::ReadLevel);

        let timer = OperationTimer::new("Collapsing pooled outcomes");
        log_policy(&policy);

        let records: Vec<PooledUmiOutcome> = read_records(&self.io.input)
            .with_context(|| format!("Failed to read records from {}", self.io.input.display()))?;
        let collapsed = collapse_pooled_outcomes(records, &policy);

        write_records(&self.io.output, &collapsed.records)
            .with_context(|| format!("Failed to write records to {}", self.io.output.display()))?;
        self.metrics.write(&collapsed.metrics)?;

        log_pooled_summary(&collapsed.metrics);
        timer.log_completion(collapsed.metrics.total_records);
        Ok(())
    }
}
