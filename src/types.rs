//! Core data model for workbook intake.
//!
//! A workbook is decoded into loosely-typed [`RawCell`]s keyed by header name ([`RawRow`]), reduced
//! to the three recognized columns ([`NormalizedRow`]), and finally coerced into a strictly-typed
//! [`ValidatedPayload`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Column names recognized by the validator, in declaration order.
pub const REQUIRED_COLUMNS: [&str; 3] = ["seniority", "years", "availability"];

/// A single decoded spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    /// No value: a column that is not present, or a `#NULL!` cell.
    Absent,
    /// Text cell.
    Text(String),
    /// Numeric cell. Integer, float and date/time serial cells all decode to this.
    Number(f64),
    /// Native boolean cell.
    Boolean(bool),
}

impl RawCell {
    /// Returns `true` for cells that count as "nothing there" under the falsy rule:
    /// absent, empty text, `0`/NaN, or `false`.
    pub fn is_falsy(&self) -> bool {
        match self {
            RawCell::Absent => true,
            RawCell::Text(s) => s.is_empty(),
            RawCell::Number(n) => *n == 0.0 || n.is_nan(),
            RawCell::Boolean(b) => !b,
        }
    }

    /// Returns `true` for absent cells and empty text. Numeric `0` and `false` are present.
    pub fn is_blank(&self) -> bool {
        match self {
            RawCell::Absent => true,
            RawCell::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

/// One data row of a sheet, keyed by the header names as they appear in the sheet.
///
/// Columns are kept in sheet order; blank cells are not stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, RawCell)>,
}

impl RawRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell under `column`.
    pub fn push(&mut self, column: impl Into<String>, cell: RawCell) {
        self.cells.push((column.into(), cell));
    }

    /// Look up a cell by its exact (case-sensitive) column name.
    pub fn get(&self, column: &str) -> Option<&RawCell> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, cell)| cell)
    }

    /// Iterate `(column, cell)` pairs in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawCell)> {
        self.cells.iter().map(|(name, cell)| (name.as_str(), cell))
    }

    /// Number of stored cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if no cell is stored.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, RawCell)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, RawCell)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// A [`RawRow`] reduced to the three recognized lowercase keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRow {
    pub seniority: Option<RawCell>,
    pub years: Option<RawCell>,
    pub availability: Option<RawCell>,
}

impl NormalizedRow {
    /// Returns `true` if a column normalized to `key` was found.
    pub fn contains(&self, key: &str) -> bool {
        self.slot(key).is_some_and(|cell| cell.is_some())
    }

    pub(crate) fn slot(&self, key: &str) -> Option<&Option<RawCell>> {
        match key {
            "seniority" => Some(&self.seniority),
            "years" => Some(&self.years),
            "availability" => Some(&self.availability),
            _ => None,
        }
    }

    pub(crate) fn slot_mut(&mut self, key: &str) -> Option<&mut Option<RawCell>> {
        match key {
            "seniority" => Some(&mut self.seniority),
            "years" => Some(&mut self.years),
            "availability" => Some(&mut self.availability),
            _ => None,
        }
    }
}

/// Experience level of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    Junior,
    Senior,
}

impl Seniority {
    /// Lowercase token used in sheets and serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Seniority::Junior => "junior",
            Seniority::Senior => "senior",
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Seniority {
    type Err = String;

    /// Exact lowercase match; callers normalize case and whitespace first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "junior" => Ok(Seniority::Junior),
            "senior" => Ok(Seniority::Senior),
            other => Err(format!("unknown seniority '{other}'")),
        }
    }
}

/// Fully validated supplemental attributes extracted from a workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedPayload {
    pub seniority: Seniority,
    /// Whole years of experience in `[0, 50]`.
    pub years: u32,
    pub availability: bool,
}

/// Workbook container formats understood by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    /// Office Open XML workbook.
    Xlsx,
    /// Macro-enabled Office Open XML workbook.
    Xlsm,
    /// Binary Office Open XML workbook.
    Xlsb,
    /// Legacy BIFF workbook.
    Xls,
    /// OpenDocument spreadsheet.
    Ods,
}

impl WorkbookFormat {
    /// Parse a workbook format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" => Some(Self::Xlsx),
            "xlsm" => Some(Self::Xlsm),
            "xlsb" => Some(Self::Xlsb),
            "xls" => Some(Self::Xls),
            "ods" => Some(Self::Ods),
            _ => None,
        }
    }

    /// Parse a workbook format from an upload's declared content type.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => Some(Self::Xlsx),
            "application/vnd.ms-excel.sheet.macroenabled.12" => Some(Self::Xlsm),
            "application/vnd.ms-excel.sheet.binary.macroenabled.12" => Some(Self::Xlsb),
            "application/vnd.ms-excel" => Some(Self::Xls),
            "application/vnd.oasis.opendocument.spreadsheet" => Some(Self::Ods),
            _ => None,
        }
    }
}
