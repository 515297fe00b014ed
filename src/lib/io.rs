//! Reading and writing positional record files.
//!
//! Record files are headerless, tab-delimited and unquoted: a field is written exactly as it is
//! held in memory, so a file read and written again is identical field for field. A path of
//! `-` refers to stdin (reading) or stdout (writing).

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};

use crate::errors::{CollapseError, Result};
use crate::progress::ProgressTracker;
use crate::record::TsvRecord;

/// Interval, in records, between progress messages while loading.
const LOAD_PROGRESS_INTERVAL: u64 = 1_000_000;

/// Returns true if `path` is `-`, meaning stdin or stdout.
#[must_use]
pub fn is_stdio_path<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().as_os_str() == "-"
}

fn io_error(path: &Path, source: io::Error) -> CollapseError {
    CollapseError::Io { path: path.display().to_string(), source }
}

fn map_csv_error(err: csv::Error, source: &str) -> CollapseError {
    let line = err.position().map_or(0, csv::Position::line);
    match err.into_kind() {
        csv::ErrorKind::Io(e) => CollapseError::Io { path: source.to_string(), source: e },
        kind => CollapseError::malformed(line, format!("{kind:?}")),
    }
}

/// Loads every record of type `R` from `path`.
///
/// # Errors
/// Returns [`CollapseError::Io`] if the file cannot be opened or read, and
/// [`CollapseError::MalformedRecord`] for the first line that does not parse. A malformed line
/// aborts the whole load.
pub fn read_records<R: TsvRecord, P: AsRef<Path>>(path: P) -> Result<Vec<R>> {
    let path = path.as_ref();
    let source = path.display().to_string();
    if is_stdio_path(path) {
        read_records_from(io::stdin().lock(), &source)
    } else {
        let file = File::open(path).map_err(|e| io_error(path, e))?;
        read_records_from(BufReader::new(file), &source)
    }
}

/// Loads every record of type `R` from an arbitrary reader. `source` names the stream in
/// errors and logs.
///
/// # Errors
/// See [`read_records`].
pub fn read_records_from<R: TsvRecord, I: Read>(input: I, source: &str) -> Result<Vec<R>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(input);

    let progress = ProgressTracker::new(format!("Loaded records from {source}"))
        .with_interval(LOAD_PROGRESS_INTERVAL);
    let mut records = Vec::new();
    let mut row = StringRecord::new();
    loop {
        match reader.read_record(&mut row) {
            Ok(false) => break,
            Ok(true) => {
                let line = row.position().map_or(0, csv::Position::line);
                let fields: Vec<&str> = row.iter().collect();
                let record = R::from_fields(&fields)
                    .map_err(|reason| CollapseError::malformed(line, reason))?;
                records.push(record);
                progress.log_if_needed(1);
            }
            Err(e) => return Err(map_csv_error(e, source)),
        }
    }
    progress.log_final();
    Ok(records)
}

/// Writes `records` to `path` in their positional text form.
///
/// # Errors
/// Returns [`CollapseError::Io`] if the file cannot be created or written.
pub fn write_records<R: TsvRecord, P: AsRef<Path>>(path: P, records: &[R]) -> Result<()> {
    let path = path.as_ref();
    let dest = path.display().to_string();
    if is_stdio_path(path) {
        write_records_to(io::stdout().lock(), records, &dest)
    } else {
        let file = File::create(path).map_err(|e| io_error(path, e))?;
        write_records_to(BufWriter::new(file), records, &dest)
    }
}

/// Writes `records` to an arbitrary writer. `dest` names the stream in errors.
///
/// # Errors
/// See [`write_records`].
pub fn write_records_to<R: TsvRecord, W: Write>(out: W, records: &[R], dest: &str) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(out);
    for record in records {
        writer.write_record(record.to_fields()).map_err(|e| map_csv_error(e, dest))?;
    }
    writer.flush().map_err(|e| CollapseError::Io { path: dest.to_string(), source: e })?;
    Ok(())
}
