//! Coherent-cell filtering of per-cell outcome records.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use fgoxide::io::DelimFile;
use log::info;

use umi_collapse_lib::coherence::{
    CoherenceThresholds, CoherentCell, DEFAULT_MIN_NUM_UMIS, DEFAULT_MIN_READS_PER_UMI, filter_coherent_cells,
};
use umi_collapse_lib::io::read_records;
use umi_collapse_lib::logging::{OperationTimer, log_coherence_summary};
use umi_collapse_lib::record::CellOutcome;
use umi_collapse_lib::validation::validate_file_exists;

use crate::commands::command::Command;
use crate::commands::common::MetricsOptions;

/// Writes coherent cells as a headed TSV.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_coherent_cells(path: &Path, cells: &[CoherentCell]) -> Result<()> {
    DelimFile::default()
        .write_tsv(&path, cells)
        .with_context(|| format!("Failed to write coherent cells: {}", path.display()))?;
    info!("Wrote {} coherent cells to {}", cells.len(), path.display());
    Ok(())
}

/// Keeps cells supported by exactly one well-covered outcome.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "filter-cells",
    author,
    version,
    about = "\x1b[38;5;30m[FILTERING]\x1b[0m \x1b[36mKeep cells with exactly one well-supported outcome\x1b[0m",
    long_about = r#"
Selects the cells whose call can be trusted from per-cell outcome records (the output of
`collapse-cells`).

A record passes when it is supported by at least `--min-umis` distinct UMIs and by at least
`--min-reads-per-umi` reads per UMI (num_reads / num_UMIs). A cell is kept only when exactly one
of its records passes; cells with two or more passing records are dropped as ambiguous.

The output is a TSV with a header row and the columns:

    cell_BC  num_UMIs  num_reads  category  subcategory  details  query_name  reads_per_UMI

ordered by cell barcode. A record with zero UMIs is an error.
"#
)]
pub struct FilterCells {
    /// Input per-cell record file (`-` for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output TSV of coherent cells
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Minimum reads per supporting UMI for a record to pass
    #[arg(long = "min-reads-per-umi", default_value_t = DEFAULT_MIN_READS_PER_UMI, allow_negative_numbers = true)]
    pub min_reads_per_umi: f64,

    /// Minimum number of supporting UMIs for a record to pass
    #[arg(long = "min-umis", default_value_t = DEFAULT_MIN_NUM_UMIS)]
    pub min_umis: u64,

    /// Metrics output options
    #[command(flatten)]
    pub metrics: MetricsOptions,
}

impl FilterCells {
    #[must_use]
    pub fn thresholds(&self) -> CoherenceThresholds {
        CoherenceThresholds { min_reads_per_umi: self.min_reads_per_umi, min_num_umis: self.min_umis }
    }
}

impl Command for FilterCells {
    fn execute(&self) -> Result<()> {
        validate_file_exists(&self.input, "Input file")?;
        let thresholds = self.thresholds();
        thresholds.validate()?;

        let timer = OperationTimer::new("Filtering coherent cells");
        info!(
            "Requiring at least {} UMIs and {} reads per UMI",
            thresholds.min_num_umis, thresholds.min_reads_per_umi
        );

        let records: Vec<CellOutcome> = read_records(&self.input)
            .with_context(|| format!("Failed to read records from {}", self.input.display()))?;
        let coherent = filter_coherent_cells(&records, &thresholds)?;
        let metrics = coherent.metrics.clone();

        write_coherent_cells(&self.output, &coherent.into_rows())?;
        self.metrics.write(&metrics)?;

        log_coherence_summary(&metrics);
        timer.log_completion(metrics.input_records);
        Ok(())
    }
}
