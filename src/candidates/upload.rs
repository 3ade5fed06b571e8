//! Creating a candidate from name/surname plus an uploaded workbook.

use std::fmt;

use crate::error::{CandidateError, CandidateResult};
use crate::ingestion::{validate_workbook_with, ValidatorOptions};
use crate::types::WorkbookFormat;

use super::model::{check_names, Candidate, NewCandidate};
use super::repository::CandidateRepository;

/// Default upload size limit (5 MiB).
pub const DEFAULT_MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// A file attached to an upload request.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-supplied file name.
    pub file_name: String,
    /// Declared content type.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

/// Plain-text fields of an upload request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateUpload {
    pub name: String,
    pub surname: String,
}

impl CandidateUpload {
    /// Apply the name/surname rules.
    pub fn validate(&self) -> CandidateResult<()> {
        check_names(&self.name, &self.surname)
    }
}

/// Limits applied to uploaded files before they reach the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadLimits {
    /// Largest accepted file, in bytes.
    pub max_file_size: usize,
    /// Workbook formats accepted by declared content type.
    pub allowed_formats: Vec<WorkbookFormat>,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_formats: vec![WorkbookFormat::Xlsx, WorkbookFormat::Xls],
        }
    }
}

impl UploadLimits {
    /// Reject files with a disallowed content type or size.
    pub fn check(&self, file: &UploadedFile) -> CandidateResult<()> {
        let allowed = WorkbookFormat::from_mime_type(&file.content_type)
            .is_some_and(|fmt| self.allowed_formats.contains(&fmt));
        if !allowed {
            return Err(CandidateError::UnsupportedFileType);
        }
        if file.bytes.len() > self.max_file_size {
            return Err(CandidateError::FileTooLarge {
                size: file.bytes.len(),
                limit: self.max_file_size,
            });
        }
        Ok(())
    }
}

/// Upload flow: checks the attachment, validates the workbook, merges it with the request's
/// name fields and stores the result.
pub struct CandidateIntake<R> {
    repository: R,
    limits: UploadLimits,
    options: ValidatorOptions,
}

impl<R: fmt::Debug> fmt::Debug for CandidateIntake<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateIntake")
            .field("repository", &self.repository)
            .field("limits", &self.limits)
            .field("options", &self.options)
            .finish()
    }
}

impl<R: CandidateRepository> CandidateIntake<R> {
    /// Create an intake with default limits and no observer.
    pub fn new(repository: R) -> Self {
        Self::with_options(repository, UploadLimits::default(), ValidatorOptions::default())
    }

    pub fn with_options(repository: R, limits: UploadLimits, options: ValidatorOptions) -> Self {
        Self {
            repository,
            limits,
            options,
        }
    }

    /// The underlying repository, for the plain CRUD operations.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Create a candidate from `upload` and the attached workbook.
    ///
    /// Checks run in this order: attachment type and size, name fields, attachment presence,
    /// workbook contents. Nothing is stored unless every check passes.
    pub fn upload(
        &self,
        upload: CandidateUpload,
        file: Option<UploadedFile>,
    ) -> CandidateResult<Candidate> {
        if let Some(file) = &file {
            self.limits.check(file)?;
        }
        upload.validate()?;
        let file = file.ok_or(CandidateError::FileRequired)?;

        let options = ValidatorOptions {
            source_label: file.file_name.clone(),
            ..self.options.clone()
        };
        let payload = validate_workbook_with(&file.bytes, &options)?;

        self.repository
            .create(NewCandidate::from_payload(upload.name, upload.surname, payload))
    }
}
