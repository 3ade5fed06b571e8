use thiserror::Error;
use uuid::Uuid;

/// Convenience result type for workbook validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Convenience result type for candidate operations.
pub type CandidateResult<T> = Result<T, CandidateError>;

/// Coarse classification of a [`ValidationError`].
///
/// Every kind, including `Wrapped`, is reported to the uploader as a rejected file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Workbook-level, row-count or column-presence problem.
    Structural,
    /// One of the recognized fields failed type/range/enum validation.
    Field,
    /// Unanticipated failure wrapped with the "Failed to process Excel file" prefix.
    Wrapped,
}

/// Error returned by workbook validation.
///
/// Display strings are user-facing and stable; callers match on them.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The workbook decoded but declares no sheets.
    #[error("Excel file must contain at least one sheet")]
    NoSheet,

    /// The first sheet has no data rows (also used when the bytes are not a workbook at all).
    #[error("Excel file must contain data rows")]
    NoDataRows,

    #[error("Excel file must contain exactly one data row")]
    MultipleDataRows,

    /// One or more recognized columns are missing, listed in declaration order.
    #[error("Missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<&'static str> },

    #[error(transparent)]
    Field(#[from] FieldError),

    /// The decoder failed after the workbook was opened (e.g. a corrupt sheet part).
    #[error("Failed to process Excel file: {0}")]
    Decoder(#[from] calamine::Error),

    /// Underlying I/O error when validating from a path.
    #[error("Failed to process Excel file: {0}")]
    Io(#[from] std::io::Error),
}

impl ValidationError {
    /// Which message family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::NoSheet
            | ValidationError::NoDataRows
            | ValidationError::MultipleDataRows
            | ValidationError::MissingColumns { .. } => ErrorKind::Structural,
            ValidationError::Field(_) => ErrorKind::Field,
            ValidationError::Decoder(_) | ValidationError::Io(_) => ErrorKind::Wrapped,
        }
    }
}

/// A single field failed coercion. Fields are checked in the order seniority, years, availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Seniority is required")]
    SeniorityRequired,
    #[error("Seniority must be a valid text value")]
    SeniorityNotText,
    #[error("Seniority must be either \"junior\" or \"senior\"")]
    SeniorityInvalid,

    #[error("Years is required")]
    YearsRequired,
    #[error("Years must be a valid number")]
    YearsNotNumber,
    #[error("Years must be a number between 0 and 50")]
    YearsOutOfRange,

    #[error("Availability is required")]
    AvailabilityRequired,
    #[error("Availability must be a valid boolean value")]
    AvailabilityNotBoolean,
    #[error("Availability must be a boolean value (true/false, 1/0, yes/no)")]
    AvailabilityInvalid,
}

impl FieldError {
    /// Name of the column this error refers to.
    pub fn column(&self) -> &'static str {
        match self {
            FieldError::SeniorityRequired
            | FieldError::SeniorityNotText
            | FieldError::SeniorityInvalid => "seniority",
            FieldError::YearsRequired | FieldError::YearsNotNumber | FieldError::YearsOutOfRange => {
                "years"
            }
            FieldError::AvailabilityRequired
            | FieldError::AvailabilityNotBoolean
            | FieldError::AvailabilityInvalid => "availability",
        }
    }
}

/// Error type returned by the candidate repository and upload flow.
#[derive(Debug, Error)]
pub enum CandidateError {
    #[error("Candidate with ID {id} not found")]
    NotFound { id: Uuid },

    /// Request-level input rejected (name/surname/years rules).
    #[error("{0}")]
    InvalidInput(String),

    #[error("Excel file is required")]
    FileRequired,

    #[error("Only Excel files (.xlsx, .xls) are allowed")]
    UnsupportedFileType,

    #[error("File too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: usize, limit: usize },

    #[error(transparent)]
    Workbook(#[from] ValidationError),
}

impl CandidateError {
    /// `true` for rejected input (a 400-style failure); `false` for missing records.
    pub fn is_bad_request(&self) -> bool {
        !matches!(self, CandidateError::NotFound { .. })
    }
}
