//! Workbook ingestion and validation.
//!
//! Most callers should use [`validate_workbook`] (from [`validator`]) which:
//!
//! - decodes the workbook bytes and reads the first sheet ([`workbook`])
//! - enforces the one-data-row contract and resolves column names case-insensitively
//!   ([`normalize`])
//! - coerces `seniority`, `years` and `availability` into typed values ([`fields`])
//! - optionally reports success/failure/alerts to an [`IntakeObserver`]

pub mod fields;
pub mod normalize;
pub mod observability;
pub mod validator;
pub mod workbook;

pub use observability::{
    CompositeObserver, FileObserver, IntakeContext, IntakeObserver, IntakeSeverity, IntakeStats,
    StdErrObserver,
};
pub use validator::{
    validate_row, validate_workbook, validate_workbook_from_path, validate_workbook_with,
    ValidatorOptions,
};
