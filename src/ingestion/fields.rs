//! Per-field coercion of raw cells into typed values.
//!
//! Each function checks presence first, then cell shape, then the value itself, and reports the
//! first problem it finds.

use crate::error::FieldError;
use crate::types::{RawCell, Seniority};

/// Inclusive bounds for `years`.
pub const YEARS_RANGE: std::ops::RangeInclusive<f64> = 0.0..=50.0;

/// Coerce a cell into a [`Seniority`].
///
/// Any falsy cell (absent, empty text, `0`, `false`) counts as missing. Other values are
/// stringified, lower-cased and trimmed, and must then be exactly `junior` or `senior`.
pub fn validate_seniority(cell: &RawCell) -> Result<Seniority, FieldError> {
    if cell.is_falsy() {
        return Err(FieldError::SeniorityRequired);
    }
    let token = cell_token(cell).ok_or(FieldError::SeniorityNotText)?;
    token.parse().map_err(|_| FieldError::SeniorityInvalid)
}

/// Coerce a cell into whole years in `[0, 50]`, truncating any fraction.
///
/// Only absent cells and empty text count as missing; a numeric `0` is accepted.
pub fn validate_years(cell: &RawCell) -> Result<u32, FieldError> {
    if cell.is_blank() {
        return Err(FieldError::YearsRequired);
    }
    let years = cell_number(cell).ok_or(FieldError::YearsNotNumber)?;
    if years.is_nan() || !YEARS_RANGE.contains(&years) {
        return Err(FieldError::YearsOutOfRange);
    }
    Ok(years.floor() as u32)
}

/// Coerce a cell into a boolean.
///
/// Native booleans pass through. Text and numbers map `true`/`1`/`yes` to `true` and
/// `false`/`0`/`no` to `false`, ignoring case and surrounding whitespace.
pub fn validate_availability(cell: &RawCell) -> Result<bool, FieldError> {
    if cell.is_blank() {
        return Err(FieldError::AvailabilityRequired);
    }
    if let RawCell::Boolean(b) = cell {
        return Ok(*b);
    }
    let token = cell_token(cell).ok_or(FieldError::AvailabilityNotBoolean)?;
    match token.as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(FieldError::AvailabilityInvalid),
    }
}

/// Lower-cased, trimmed string form of a text/number/boolean cell.
fn cell_token(cell: &RawCell) -> Option<String> {
    let raw = match cell {
        RawCell::Text(s) => s.clone(),
        RawCell::Number(n) => number_to_string(*n),
        RawCell::Boolean(b) => b.to_string(),
        RawCell::Absent => return None,
    };
    Some(raw.to_lowercase().trim().to_string())
}

fn number_to_string(n: f64) -> String {
    if n == 0.0 {
        // Covers -0.
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Numeric value of a text/number/boolean cell. Unparseable text yields NaN.
fn cell_number(cell: &RawCell) -> Option<f64> {
    match cell {
        RawCell::Number(n) => Some(*n),
        RawCell::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        RawCell::Text(s) => Some(parse_number(s)),
        RawCell::Absent => None,
    }
}

/// Spreadsheet-script style text to number conversion.
///
/// Whitespace-only text is `0`; `0x`/`0o`/`0b` prefixes are integer literals; anything else
/// goes through decimal float parsing.
fn parse_number(s: &str) -> f64 {
    let t = s.trim();
    if t.is_empty() {
        return 0.0;
    }
    let radix = match t.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &t[2..];
        if digits.starts_with(['+', '-']) {
            return f64::NAN;
        }
        return u64::from_str_radix(digits, radix)
            .map(|v| v as f64)
            .unwrap_or(f64::NAN);
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}
