//! Outcome record types.
//!
//! Three record shapes flow through the collapsing stages:
//!
//! - [`UmiOutcome`]: one read-level (or, after collapsing, UMI-level) outcome keyed by cell
//!   barcode and UMI
//! - [`PooledUmiOutcome`]: the same keyed by UMI and a pre-existing cluster id
//! - [`CellOutcome`]: one aggregated outcome per cell barcode
//!
//! All three share the [`OutcomeKey`] triple and a fixed positional text form (see
//! [`TsvRecord`]), which is the interchange format with the upstream classification stage and
//! downstream consumers.

use std::fmt;

/// The (category, subcategory, details) triple identifying a distinct classification result.
///
/// Two records are the same outcome iff all three strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct OutcomeKey {
    pub category: String,
    pub subcategory: String,
    pub details: String,
}

impl OutcomeKey {
    #[must_use]
    pub fn new(
        category: impl Into<String>,
        subcategory: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self { category: category.into(), subcategory: subcategory.into(), details: details.into() }
    }

    /// Parses a comma-separated `category,subcategory,details` triple.
    ///
    /// Returns `None` unless there are exactly three comma-separated parts.
    ///
    /// ```
    /// use umi_collapse_lib::record::OutcomeKey;
    ///
    /// let key = OutcomeKey::parse_triple("no indel,other,ambiguous").unwrap();
    /// assert_eq!(key.subcategory, "other");
    /// assert!(OutcomeKey::parse_triple("deletion,-3").is_none());
    /// ```
    #[must_use]
    pub fn parse_triple(triple: &str) -> Option<Self> {
        let mut parts = triple.split(',');
        let key = Self::new(parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() { None } else { Some(key) }
    }
}

impl fmt::Display for OutcomeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.category, self.subcategory, self.details)
    }
}

/// Access shared by every record that carries an outcome and a read count.
pub trait OutcomeRecord: Clone {
    fn outcome(&self) -> &OutcomeKey;

    fn num_reads(&self) -> u64;

    /// Overwrites the read count. Only aggregation calls this, on an already-selected copy.
    fn set_num_reads(&mut self, num_reads: u64);
}

/// A record with a fixed, positional, tab-delimited text form.
pub trait TsvRecord: Sized {
    /// Column names in positional order.
    const COLUMNS: &'static [&'static str];

    /// Builds a record from exactly [`Self::COLUMNS`]`.len()` fields.
    ///
    /// # Errors
    /// Returns a human-readable reason when the field count is wrong or a numeric field does not
    /// parse. The caller attaches the line number.
    fn from_fields(fields: &[&str]) -> Result<Self, String>;

    /// The record's fields in positional order.
    fn to_fields(&self) -> Vec<String>;

    /// Parses one line of the text form. A trailing newline is ignored.
    ///
    /// # Errors
    /// See [`TsvRecord::from_fields`].
    fn from_line(line: &str) -> Result<Self, String> {
        let line = line.trim_end_matches(['\n', '\r']);
        let fields: Vec<&str> = line.split('\t').collect();
        Self::from_fields(&fields)
    }

    /// Renders the record as one tab-joined line without a trailing newline.
    fn to_line(&self) -> String {
        self.to_fields().join("\t")
    }
}

fn check_field_count(fields: &[&str], columns: &[&str]) -> Result<(), String> {
    if fields.len() == columns.len() {
        Ok(())
    } else {
        Err(format!("expected {} fields ({}), found {}", columns.len(), columns.join(", "), fields.len()))
    }
}

/// Counts are plain digit strings; `u64::from_str` alone would also take a leading `+`.
fn parse_count(value: &str, column: &str) -> Result<u64, String> {
    let invalid = || format!("{column} must be a non-negative integer, got '{value}'");
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse::<u64>().map_err(|_| invalid())
}

fn parse_read_count(value: &str) -> Result<u64, String> {
    match parse_count(value, "num_reads")? {
        0 => Err("num_reads must be >= 1, got 0".to_string()),
        n => Ok(n),
    }
}

/// A read-level outcome for one (cell barcode, UMI).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UmiOutcome {
    pub cell_barcode: String,
    pub umi: String,
    pub num_reads: u64,
    pub outcome: OutcomeKey,
    /// Name of one representative originating read.
    pub query_name: String,
}

impl UmiOutcome {
    #[must_use]
    pub fn new(
        cell_barcode: impl Into<String>,
        umi: impl Into<String>,
        num_reads: u64,
        outcome: OutcomeKey,
        query_name: impl Into<String>,
    ) -> Self {
        Self {
            cell_barcode: cell_barcode.into(),
            umi: umi.into(),
            num_reads,
            outcome,
            query_name: query_name.into(),
        }
    }
}

impl OutcomeRecord for UmiOutcome {
    fn outcome(&self) -> &OutcomeKey {
        &self.outcome
    }

    fn num_reads(&self) -> u64 {
        self.num_reads
    }

    fn set_num_reads(&mut self, num_reads: u64) {
        self.num_reads = num_reads;
    }
}

impl TsvRecord for UmiOutcome {
    const COLUMNS: &'static [&'static str] =
        &["cell_BC", "UMI", "num_reads", "category", "subcategory", "details", "query_name"];

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        check_field_count(fields, Self::COLUMNS)?;
        Ok(Self {
            cell_barcode: fields[0].to_string(),
            umi: fields[1].to_string(),
            num_reads: parse_read_count(fields[2])?,
            outcome: OutcomeKey::new(fields[3], fields[4], fields[5]),
            query_name: fields[6].to_string(),
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.cell_barcode.clone(),
            self.umi.clone(),
            self.num_reads.to_string(),
            self.outcome.category.clone(),
            self.outcome.subcategory.clone(),
            self.outcome.details.clone(),
            self.query_name.clone(),
        ]
    }
}

/// A read-level outcome for one (UMI, cluster id), used when reads are pooled across a
/// pre-existing clustering instead of per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PooledUmiOutcome {
    pub umi: String,
    pub cluster_id: String,
    pub num_reads: u64,
    pub outcome: OutcomeKey,
}

impl PooledUmiOutcome {
    #[must_use]
    pub fn new(
        umi: impl Into<String>,
        cluster_id: impl Into<String>,
        num_reads: u64,
        outcome: OutcomeKey,
    ) -> Self {
        Self { umi: umi.into(), cluster_id: cluster_id.into(), num_reads, outcome }
    }
}

impl OutcomeRecord for PooledUmiOutcome {
    fn outcome(&self) -> &OutcomeKey {
        &self.outcome
    }

    fn num_reads(&self) -> u64 {
        self.num_reads
    }

    fn set_num_reads(&mut self, num_reads: u64) {
        self.num_reads = num_reads;
    }
}

impl TsvRecord for PooledUmiOutcome {
    const COLUMNS: &'static [&'static str] =
        &["UMI", "cluster_id", "num_reads", "category", "subcategory", "details"];

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        check_field_count(fields, Self::COLUMNS)?;
        Ok(Self {
            umi: fields[0].to_string(),
            cluster_id: fields[1].to_string(),
            num_reads: parse_read_count(fields[2])?,
            outcome: OutcomeKey::new(fields[3], fields[4], fields[5]),
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.umi.clone(),
            self.cluster_id.clone(),
            self.num_reads.to_string(),
            self.outcome.category.clone(),
            self.outcome.subcategory.clone(),
            self.outcome.details.clone(),
        ]
    }
}

/// One aggregated outcome for a cell barcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellOutcome {
    pub cell_barcode: String,
    /// Distinct UMIs supporting this outcome in this cell.
    pub num_umis: u64,
    /// Reads summed across those UMIs.
    pub num_reads: u64,
    pub outcome: OutcomeKey,
    /// Read name taken from the highest-read UMI record.
    pub query_name: String,
}

impl CellOutcome {
    /// Reads per supporting UMI, or `None` when `num_umis` is zero.
    #[must_use]
    pub fn reads_per_umi(&self) -> Option<f64> {
        if self.num_umis == 0 { None } else { Some(self.num_reads as f64 / self.num_umis as f64) }
    }
}

impl TsvRecord for CellOutcome {
    const COLUMNS: &'static [&'static str] =
        &["cell_BC", "num_UMIs", "num_reads", "category", "subcategory", "details", "query_name"];

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        check_field_count(fields, Self::COLUMNS)?;
        Ok(Self {
            cell_barcode: fields[0].to_string(),
            num_umis: parse_count(fields[1], "num_UMIs")?,
            num_reads: parse_count(fields[2], "num_reads")?,
            outcome: OutcomeKey::new(fields[3], fields[4], fields[5]),
            query_name: fields[6].to_string(),
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.cell_barcode.clone(),
            self.num_umis.to_string(),
            self.num_reads.to_string(),
            self.outcome.category.clone(),
            self.outcome.subcategory.clone(),
            self.outcome.details.clone(),
            self.query_name.clone(),
        ]
    }
}
