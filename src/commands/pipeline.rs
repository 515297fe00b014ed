//! End-to-end run from read-level records to coherent cells.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use umi_collapse_lib::coherence::{
    CoherenceThresholds, DEFAULT_MIN_NUM_UMIS, DEFAULT_MIN_READS_PER_UMI, filter_coherent_cells,
};
use umi_collapse_lib::collapse::{UmiCollapseConfig, collapse_cell_outcomes, collapse_umi_outcomes};
use umi_collapse_lib::io::{read_records, write_records};
use umi_collapse_lib::logging::{
    OperationTimer, log_cell_collapse_summary, log_coherence_summary, log_umi_collapse_summary,
};
use umi_collapse_lib::record::UmiOutcome;
use umi_collapse_lib::umi::{CorrectionScope, DEFAULT_MAX_UMI_DISTANCE, UmiCorrector};
use umi_collapse_lib::validation::{validate_file_exists, validate_output_prefix};

use crate::commands::command::Command;
use crate::commands::common::{
    RelevanceOptions, RelevancePreset, ThreadingOptions, log_policy, write_metrics_file,
};
use crate::commands::filter_cells::write_coherent_cells;

/// Runs per-UMI collapsing, per-cell collapsing and coherence filtering in one pass.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pipeline",
    author,
    version,
    about = "\x1b[38;5;166m[WORKFLOW]\x1b[0m \x1b[36mRun collapse-umis, collapse-cells and filter-cells in one pass\x1b[0m",
    long_about = r#"
Runs the full collapsing workflow on read-level outcome records:

1. `collapse-umis`: correct UMIs per cell and keep the dominant outcome(s) per (cell, UMI)
2. `collapse-cells`: collapse the per-UMI records per cell
3. `filter-cells`: keep cells with exactly one well-supported outcome

The following files are written next to `--output-prefix`:

- `<prefix>.umi_outcomes.txt`: per-UMI records
- `<prefix>.cell_outcomes.txt`: per-cell records
- `<prefix>.coherent_cells.txt`: coherent cells (headed TSV)
- `<prefix>.umi_metrics.txt`, `<prefix>.cell_metrics.txt`, `<prefix>.coherence_metrics.txt`

Custom relevance options apply to both collapsing steps; without them each step uses its own
default exclusions.
"#
)]
pub struct Pipeline {
    /// Input read-level record file (`-` for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Prefix for all output files
    #[arg(short = 'o', long = "output-prefix")]
    pub output_prefix: PathBuf,

    /// Maximum mismatches for a UMI to be corrected to a more abundant UMI
    #[arg(short = 'd', long = "max-umi-distance", default_value_t = i64::from(DEFAULT_MAX_UMI_DISTANCE), allow_negative_numbers = true)]
    pub max_umi_distance: i64,

    /// Which records share a UMI ranking during correction
    #[arg(long = "correction-scope", value_enum, default_value_t = CorrectionScope::default())]
    pub correction_scope: CorrectionScope,

    /// Minimum reads per supporting UMI for a cell record to pass
    #[arg(long = "min-reads-per-umi", default_value_t = DEFAULT_MIN_READS_PER_UMI, allow_negative_numbers = true)]
    pub min_reads_per_umi: f64,

    /// Minimum number of supporting UMIs for a cell record to pass
    #[arg(long = "min-umis", default_value_t = DEFAULT_MIN_NUM_UMIS)]
    pub min_umis: u64,

    /// Relevance policy options
    #[command(flatten)]
    pub relevance: RelevanceOptions,

    /// Threading options
    #[command(flatten)]
    pub threading: ThreadingOptions,
}

impl Pipeline {
    /// Path of the output file with the given suffix.
    #[must_use]
    pub fn output_path(&self, suffix: &str) -> PathBuf {
        let mut path = self.output_prefix.clone().into_os_string();
        path.push(suffix);
        PathBuf::from(path)
    }

    fn validate(&self) -> Result<(UmiCollapseConfig, CoherenceThresholds)> {
        validate_file_exists(&self.input, "Input file")?;
        validate_output_prefix(&self.output_prefix)?;
        self.threading.validate()?;
        let config = UmiCollapseConfig {
            corrector: UmiCorrector::new(self.max_umi_distance)?,
            scope: self.correction_scope,
            policy: self.relevance.to_policy(RelevancePreset::ReadLevel),
            threads: self.threading.threads,
        };
        let thresholds = CoherenceThresholds { min_reads_per_umi: self.min_reads_per_umi, min_num_umis: self.min_umis };
        thresholds.validate()?;
        Ok((config, thresholds))
    }
}

impl Command for Pipeline {
    fn execute(&self) -> Result<()> {
        let (config, thresholds) = self.validate()?;
        let cell_policy = self.relevance.to_policy(RelevancePreset::CellLevel);

        let timer = OperationTimer::new("Running collapse pipeline");
        info!("{}", self.threading.log_message());

        let records: Vec<UmiOutcome> = read_records(&self.input)
            .with_context(|| format!("Failed to read records from {}", self.input.display()))?;
        let total_records = records.len() as u64;

        log_policy(&config.policy);
        let umis = collapse_umi_outcomes(records, &config)?;
        let umi_path = self.output_path(".umi_outcomes.txt");
        write_records(&umi_path, &umis.records)
            .with_context(|| format!("Failed to write records to {}", umi_path.display()))?;
        write_metrics_file(&self.output_path(".umi_metrics.txt"), &umis.metrics)?;
        log_umi_collapse_summary(&umis.metrics);

        log_policy(&cell_policy);
        let cells = collapse_cell_outcomes(umis.records, &cell_policy);
        let cell_path = self.output_path(".cell_outcomes.txt");
        write_records(&cell_path, &cells.records)
            .with_context(|| format!("Failed to write records to {}", cell_path.display()))?;
        write_metrics_file(&self.output_path(".cell_metrics.txt"), &cells.metrics)?;
        log_cell_collapse_summary(&cells.metrics);

        let coherent = filter_coherent_cells(&cells.records, &thresholds)?;
        let metrics = coherent.metrics.clone();
        write_coherent_cells(&self.output_path(".coherent_cells.txt"), &coherent.into_rows())?;
        write_metrics_file(&self.output_path(".coherence_metrics.txt"), &metrics)?;
        log_coherence_summary(&metrics);

        timer.log_completion(total_records);
        Ok(())
    }
}
