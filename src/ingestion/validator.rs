//! Workbook validation entrypoint.
//!
//! Most callers should use [`validate_workbook`], which turns the bytes of an uploaded workbook
//! into a [`ValidatedPayload`] or a [`ValidationError`] whose message is safe to show the user.
//!
//! - [`validate_workbook_with`] takes [`ValidatorOptions`] and reports outcomes to an
//!   [`IntakeObserver`].
//! - [`validate_workbook_from_path`] reads the file first; I/O failures are wrapped like any other
//!   unanticipated failure.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{ValidationError, ValidationResult};
use crate::types::{RawCell, RawRow, ValidatedPayload, WorkbookFormat};

use super::fields::{validate_availability, validate_seniority, validate_years};
use super::normalize::{normalize_row, require_columns};
use super::observability::{IntakeContext, IntakeObserver, IntakeSeverity, IntakeStats};
use super::workbook::read_first_sheet;

const DEFAULT_SOURCE_LABEL: &str = "<memory>";

/// Options controlling validation reporting.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ValidatorOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IntakeObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IntakeSeverity,
    /// Label reported to the observer as [`IntakeContext::source`].
    pub source_label: String,
}

impl fmt::Debug for ValidatorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .field("source_label", &self.source_label)
            .finish()
    }
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: IntakeSeverity::Critical,
            source_label: DEFAULT_SOURCE_LABEL.to_string(),
        }
    }
}

/// Validate a single-row workbook.
///
/// The first sheet must hold a header row and exactly one data row with the columns
/// `seniority`, `years` and `availability` (any case, extra columns ignored). Validation is
/// all-or-nothing and stateless: the same bytes always give the same result.
///
/// ```no_run
/// use candidate_intake::ingestion::validate_workbook;
///
/// # fn main() -> Result<(), candidate_intake::ValidationError> {
/// let bytes = std::fs::read("candidate.xlsx")?;
/// let payload = validate_workbook(&bytes)?;
/// println!("{} / {} years / available={}", payload.seniority, payload.years, payload.availability);
/// # Ok(())
/// # }
/// ```
pub fn validate_workbook(bytes: &[u8]) -> ValidationResult<ValidatedPayload> {
    validate_with_format(bytes).map(|(_, payload)| payload)
}

/// Same as [`validate_workbook`], reporting the outcome to `options.observer`.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with the detected format and payload
/// - `on_failure` on failure, with a severity derived from the error kind
/// - `on_alert` on failure when that severity is >= `options.alert_at_or_above`
pub fn validate_workbook_with(
    bytes: &[u8],
    options: &ValidatorOptions,
) -> ValidationResult<ValidatedPayload> {
    let ctx = IntakeContext {
        source: options.source_label.clone(),
        bytes: bytes.len(),
    };
    let result = validate_with_format(bytes);
    report(options, &ctx, result)
}

/// Read a workbook from `path` and validate it.
///
/// The path is used as the observer source label unless `options.source_label`
/// was changed from its default.
pub fn validate_workbook_from_path(
    path: impl AsRef<Path>,
    options: &ValidatorOptions,
) -> ValidationResult<ValidatedPayload> {
    let path = path.as_ref();
    let source = if options.source_label == DEFAULT_SOURCE_LABEL {
        path.display().to_string()
    } else {
        options.source_label.clone()
    };

    match std::fs::read(path) {
        Ok(bytes) => {
            let ctx = IntakeContext {
                source,
                bytes: bytes.len(),
            };
            report(options, &ctx, validate_with_format(&bytes))
        }
        Err(e) => {
            let ctx = IntakeContext { source, bytes: 0 };
            report(options, &ctx, Err(e.into()))
        }
    }
}

fn report(
    options: &ValidatorOptions,
    ctx: &IntakeContext,
    result: ValidationResult<(WorkbookFormat, ValidatedPayload)>,
) -> ValidationResult<ValidatedPayload> {
    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok((format, payload)) => obs.on_success(
                ctx,
                IntakeStats {
                    format: *format,
                    payload: *payload,
                },
            ),
            Err(e) => {
                let sev = IntakeSeverity::for_error(e);
                obs.on_failure(ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(ctx, sev, e);
                }
            }
        }
    }
    result.map(|(_, payload)| payload)
}

fn validate_with_format(bytes: &[u8]) -> ValidationResult<(WorkbookFormat, ValidatedPayload)> {
    let sheet = read_first_sheet(bytes)?.ok_or(ValidationError::NoDataRows)?;
    let row = single_row(sheet.rows)?;
    Ok((sheet.format, validate_row(&row)?))
}

fn single_row(mut rows: Vec<RawRow>) -> ValidationResult<RawRow> {
    match rows.len() {
        0 => Err(ValidationError::NoDataRows),
        1 => Ok(rows.remove(0)),
        _ => Err(ValidationError::MultipleDataRows),
    }
}

/// Validate one already-decoded row: column presence, then seniority, years and availability
/// in that order.
pub fn validate_row(row: &RawRow) -> ValidationResult<ValidatedPayload> {
    let normalized = normalize_row(row);
    require_columns(&normalized)?;

    let absent = RawCell::Absent;
    Ok(ValidatedPayload {
        seniority: validate_seniority(normalized.seniority.as_ref().unwrap_or(&absent))?,
        years: validate_years(normalized.years.as_ref().unwrap_or(&absent))?,
        availability: validate_availability(normalized.availability.as_ref().unwrap_or(&absent))?,
    })
}
