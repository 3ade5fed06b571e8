//! Case-insensitive column resolution.

use crate::error::{ValidationError, ValidationResult};
use crate::types::{NormalizedRow, RawRow, REQUIRED_COLUMNS};

/// Reduce `row` to the recognized columns by lower-casing every column name.
///
/// Unrecognized columns are dropped. When two columns differ only in case, the one further right
/// in the sheet wins.
pub fn normalize_row(row: &RawRow) -> NormalizedRow {
    let mut out = NormalizedRow::default();
    for (column, cell) in row.iter() {
        if let Some(slot) = out.slot_mut(&column.to_lowercase()) {
            *slot = Some(cell.clone());
        }
    }
    out
}

/// Recognized columns absent from `row`, in declaration order.
pub fn missing_columns(row: &NormalizedRow) -> Vec<&'static str> {
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !row.contains(col))
        .collect()
}

/// Fail with [`ValidationError::MissingColumns`] unless every recognized column is present.
pub fn require_columns(row: &NormalizedRow) -> ValidationResult<()> {
    let columns = missing_columns(row);
    if columns.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingColumns { columns })
    }
}
