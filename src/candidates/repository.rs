//! Candidate persistence.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::error::{CandidateError, CandidateResult};

use super::model::{Candidate, CandidatePatch, NewCandidate};

/// Storage for candidate records.
///
/// Implementations assign ids and timestamps and must be safe to share across threads.
pub trait CandidateRepository: Send + Sync {
    /// Validate and store a new candidate.
    fn create(&self, candidate: NewCandidate) -> CandidateResult<Candidate>;

    /// All candidates, most recently created first.
    fn find_all(&self) -> CandidateResult<Vec<Candidate>>;

    /// A single candidate, or [`CandidateError::NotFound`].
    fn find_one(&self, id: Uuid) -> CandidateResult<Candidate>;

    /// Apply `patch` to an existing candidate and bump `updated_at`.
    fn update(&self, id: Uuid, patch: CandidatePatch) -> CandidateResult<Candidate>;

    /// Delete a candidate, or fail with [`CandidateError::NotFound`].
    fn remove(&self, id: Uuid) -> CandidateResult<()>;
}

/// Process-local [`CandidateRepository`] backed by a mutex-guarded map.
#[derive(Default)]
pub struct InMemoryCandidateRepository {
    records: Mutex<HashMap<Uuid, Candidate>>,
}

impl InMemoryCandidateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, HashMap<Uuid, Candidate>> {
        // Poisoning is ignored: every write is a single map operation.
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl fmt::Debug for InMemoryCandidateRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryCandidateRepository")
            .field("records_len", &self.records().len())
            .finish()
    }
}

impl CandidateRepository for InMemoryCandidateRepository {
    fn create(&self, candidate: NewCandidate) -> CandidateResult<Candidate> {
        candidate.validate()?;
        let now = Utc::now();
        let record = Candidate {
            id: Uuid::now_v7(),
            name: candidate.name,
            surname: candidate.surname,
            seniority: candidate.seniority,
            years: candidate.years,
            availability: candidate.availability,
            created_at: now,
            updated_at: now,
        };
        self.records().insert(record.id, record.clone());
        Ok(record)
    }

    fn find_all(&self) -> CandidateResult<Vec<Candidate>> {
        let mut all: Vec<Candidate> = self.records().values().cloned().collect();
        all.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(all)
    }

    fn find_one(&self, id: Uuid) -> CandidateResult<Candidate> {
        self.records()
            .get(&id)
            .cloned()
            .ok_or(CandidateError::NotFound { id })
    }

    fn update(&self, id: Uuid, patch: CandidatePatch) -> CandidateResult<Candidate> {
        patch.validate()?;
        let mut records = self.records();
        let record = records.get_mut(&id).ok_or(CandidateError::NotFound { id })?;
        patch.apply_to(record);
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    fn remove(&self, id: Uuid) -> CandidateResult<()> {
        self.records()
            .remove(&id)
            .map(|_| ())
            .ok_or(CandidateError::NotFound { id })
    }
}
