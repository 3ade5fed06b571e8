//! `candidate-intake` validates a single-row spreadsheet describing one candidate's supplemental
//! attributes and turns it into a typed [`types::ValidatedPayload`].
//!
//! The primary entrypoint is [`ingestion::validate_workbook`], which takes the raw bytes of an
//! uploaded workbook.
//!
//! ## What a valid workbook looks like
//!
//! - Any format the decoder understands: `.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`
//! - The **first** sheet has a header row followed by **exactly one** data row
//! - Headers `seniority`, `years` and `availability` are present (matched case-insensitively;
//!   other columns are ignored)
//!
//! **Field rules:**
//!
//! - `seniority`: `junior` or `senior` (case-insensitive, trimmed)
//! - `years`: a number in `[0, 50]`; fractions are truncated
//! - `availability`: a native boolean, or one of `true`/`1`/`yes`, `false`/`0`/`no`
//!
//! Every failure is a [`ValidationError`] whose `Display` is a fixed, user-facing message such as
//! `Excel file must contain exactly one data row` or `Years must be a number between 0 and 50`.
//! Unanticipated decoder/I/O failures are prefixed with `Failed to process Excel file: `; use
//! [`ValidationError::kind`] to tell the families apart.
//!
//! ## Quick example: validate a workbook
//!
//! ```no_run
//! use candidate_intake::ingestion::validate_workbook;
//! use candidate_intake::types::Seniority;
//!
//! # fn main() -> Result<(), candidate_intake::ValidationError> {
//! let bytes = std::fs::read("candidate.xlsx")?;
//! let payload = validate_workbook(&bytes)?;
//! assert!(matches!(payload.seniority, Seniority::Junior | Seniority::Senior));
//! # Ok(())
//! # }
//! ```
//!
//! ## Upload flow
//!
//! [`candidates::CandidateIntake`] wraps the validator with the checks an upload endpoint needs
//! (attachment present, content type, size limit), merges the payload with `name`/`surname` and
//! stores the record through a [`candidates::CandidateRepository`].
//!
//! ```no_run
//! use candidate_intake::candidates::{
//!     CandidateIntake, CandidateUpload, InMemoryCandidateRepository, UploadedFile,
//! };
//!
//! # fn main() -> Result<(), candidate_intake::CandidateError> {
//! let intake = CandidateIntake::new(InMemoryCandidateRepository::new());
//! let file = UploadedFile {
//!     file_name: "candidate.xlsx".to_string(),
//!     content_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
//!     bytes: std::fs::read("candidate.xlsx").unwrap_or_default(),
//! };
//! let upload = CandidateUpload { name: "John".to_string(), surname: "Doe".to_string() };
//! let candidate = intake.upload(upload, Some(file))?;
//! println!("created {}", candidate.id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: decoding, normalization, field coercion and the validation entrypoints
//! - [`types`]: raw cell/row types and the validated payload
//! - [`candidates`]: stored records, repository and upload flow
//! - [`error`]: error types

pub mod candidates;
pub mod error;
pub mod ingestion;
pub mod types;

pub use error::{
    CandidateError, CandidateResult, ErrorKind, FieldError, ValidationError, ValidationResult,
};
