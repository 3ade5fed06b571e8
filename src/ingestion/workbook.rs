//! Workbook decoding: bytes to header-keyed [`RawRow`]s for the first sheet.

use std::io::{Cursor, Read, Seek};

use calamine::{open_workbook_auto_from_rs, CellErrorType, Data, Range, Reader, Sheets};

use crate::error::{ValidationError, ValidationResult};
use crate::types::{RawCell, RawRow, WorkbookFormat};

/// Data rows extracted from the first sheet of a workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRows {
    /// Container format the decoder recognized.
    pub format: WorkbookFormat,
    /// Name of the sheet the rows were read from.
    pub sheet: String,
    /// Header names after `__EMPTY` / duplicate-suffix handling.
    pub headers: Vec<String>,
    /// Non-blank data rows, in sheet order.
    pub rows: Vec<RawRow>,
}

/// Decode `bytes` and read the data rows of the first sheet.
///
/// Behavior:
/// - Bytes the decoder cannot open at all (garbage, empty buffer) yield zero rows
/// - A workbook without sheets fails with [`ValidationError::NoSheet`]
/// - The first non-empty row is the header row; every later non-blank row is a data row
/// - Blank cells and error cells are left out of their row, except `#NULL!`, which is kept as
///   [`RawCell::Absent`]
/// - Failures reading the sheet itself surface as [`ValidationError::Decoder`]
pub fn read_first_sheet(bytes: &[u8]) -> ValidationResult<Option<SheetRows>> {
    let mut workbook = match open_workbook_auto_from_rs(Cursor::new(bytes)) {
        Ok(wb) => wb,
        Err(_) => return Ok(None),
    };
    let format = detected_format(&workbook);

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ValidationError::NoSheet)?;
    let range = workbook.worksheet_range(&sheet)?;

    let (headers, rows) = extract_rows(&range);
    Ok(Some(SheetRows {
        format,
        sheet,
        headers,
        rows,
    }))
}

fn detected_format<RS: Read + Seek>(workbook: &Sheets<RS>) -> WorkbookFormat {
    match workbook {
        Sheets::Xls(_) => WorkbookFormat::Xls,
        Sheets::Xlsx(_) => WorkbookFormat::Xlsx,
        Sheets::Xlsb(_) => WorkbookFormat::Xlsb,
        Sheets::Ods(_) => WorkbookFormat::Ods,
    }
}

fn extract_rows(range: &Range<Data>) -> (Vec<String>, Vec<RawRow>) {
    let mut rows_iter = range
        .rows()
        .skip_while(|row| row.iter().all(|c| matches!(c, Data::Empty)));

    let headers = match rows_iter.next() {
        Some(header_row) => header_names(header_row),
        None => return (Vec::new(), Vec::new()),
    };

    let mut rows: Vec<RawRow> = Vec::new();
    for row in rows_iter {
        let mut out = RawRow::new();
        for (name, cell) in headers.iter().zip(row.iter()) {
            if let Some(value) = convert_cell(cell) {
                out.push(name.clone(), value);
            }
        }
        // Blank rows are skipped rather than counted.
        if !out.is_empty() {
            rows.push(out);
        }
    }

    (headers, rows)
}

/// Render header cells as column names.
///
/// Empty headers become `__EMPTY`; a name seen before gets a `_1`, `_2`, ... suffix, so only
/// case variants of a name can share a normalized key downstream.
fn header_names(row: &[Data]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(row.len());
    for cell in row {
        let base = match cell_to_header_string(cell) {
            s if s.is_empty() => "__EMPTY".to_string(),
            s => s,
        };
        let mut name = base.clone();
        let mut n = 0;
        while names.contains(&name) {
            n += 1;
            name = format!("{base}_{n}");
        }
        names.push(name);
    }
    names
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(d) => d.as_f64().to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
        Data::Empty => String::new(),
    }
}

/// Cell value to store in a row, or `None` when the cell is left out.
fn convert_cell(c: &Data) -> Option<RawCell> {
    let cell = match c {
        Data::Empty => return None,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Float(f) => RawCell::Number(*f),
        Data::Bool(b) => RawCell::Boolean(*b),
        Data::DateTime(d) => RawCell::Number(d.as_f64()),
        Data::DateTimeIso(s) => RawCell::Text(s.clone()),
        Data::DurationIso(s) => RawCell::Text(s.clone()),
        // `#NULL!` keeps its column present with no value; other error values are dropped.
        Data::Error(CellErrorType::Null) => RawCell::Absent,
        Data::Error(_) => return None,
    };
    Some(cell)
}
