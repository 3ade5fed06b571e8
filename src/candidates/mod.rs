//! Candidate records and the upload flow that builds them from a workbook.
//!
//! - [`model`]: stored record, create/patch inputs and their field rules
//! - [`repository`]: [`CandidateRepository`] plus an in-memory implementation
//! - [`upload`]: [`CandidateIntake`], which validates an uploaded workbook and stores the result

pub mod model;
pub mod repository;
pub mod upload;

pub use model::{Candidate, CandidatePatch, NewCandidate};
pub use repository::{CandidateRepository, InMemoryCandidateRepository};
pub use upload::{CandidateIntake, CandidateUpload, UploadLimits, UploadedFile};
