//! Stored candidate records and the request-level rules for their plain fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CandidateError, CandidateResult};
use crate::types::{Seniority, ValidatedPayload};

/// Maximum length (in characters) of `name` and `surname`.
pub const MAX_NAME_LEN: usize = 100;

/// Upper bound for `years` on direct create/update.
pub const MAX_YEARS: u32 = 50;

/// A persisted candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub seniority: Seniority,
    pub years: u32,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a candidate; id and timestamps are assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCandidate {
    pub name: String,
    pub surname: String,
    pub seniority: Seniority,
    pub years: u32,
    pub availability: bool,
}

impl NewCandidate {
    /// Merge plain-text name fields with the values validated from a workbook.
    pub fn from_payload(
        name: impl Into<String>,
        surname: impl Into<String>,
        payload: ValidatedPayload,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            seniority: payload.seniority,
            years: payload.years,
            availability: payload.availability,
        }
    }

    /// Apply the name/surname/years rules.
    pub fn validate(&self) -> CandidateResult<()> {
        check_names(&self.name, &self.surname)?;
        check_years(self.years)
    }
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePatch {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub seniority: Option<Seniority>,
    pub years: Option<u32>,
    pub availability: Option<bool>,
}

impl CandidatePatch {
    /// Apply the same rules as [`NewCandidate::validate`] to the fields that are present.
    pub fn validate(&self) -> CandidateResult<()> {
        if let Some(name) = &self.name {
            check_name("name", name)?;
        }
        if let Some(surname) = &self.surname {
            check_name("surname", surname)?;
        }
        if let Some(years) = self.years {
            check_years(years)?;
        }
        Ok(())
    }

    /// Copy present fields onto `candidate`. Timestamps are left to the caller.
    pub fn apply_to(&self, candidate: &mut Candidate) {
        if let Some(name) = &self.name {
            candidate.name = name.clone();
        }
        if let Some(surname) = &self.surname {
            candidate.surname = surname.clone();
        }
        if let Some(seniority) = self.seniority {
            candidate.seniority = seniority;
        }
        if let Some(years) = self.years {
            candidate.years = years;
        }
        if let Some(availability) = self.availability {
            candidate.availability = availability;
        }
    }
}

pub(super) fn check_names(name: &str, surname: &str) -> CandidateResult<()> {
    check_name("name", name)?;
    check_name("surname", surname)
}

fn check_name(field: &str, value: &str) -> CandidateResult<()> {
    if value.trim().is_empty() {
        return Err(CandidateError::InvalidInput(format!("{field} should not be empty")));
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(CandidateError::InvalidInput(format!(
            "{field} must be shorter than or equal to {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

fn check_years(years: u32) -> CandidateResult<()> {
    if years > MAX_YEARS {
        return Err(CandidateError::InvalidInput(format!(
            "years must not be greater than {MAX_YEARS}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_candidate() -> NewCandidate {
        NewCandidate {
            name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            seniority: Seniority::Senior,
            years: 12,
            availability: true,
        }
    }

    #[test]
    fn name_rules() {
        assert!(new_candidate().validate().is_ok());

        let mut c = new_candidate();
        c.name = "   ".to_string();
        assert_eq!(c.validate().unwrap_err().to_string(), "name should not be empty");

        let mut c = new_candidate();
        c.surname = "x".repeat(MAX_NAME_LEN + 1);
        assert_eq!(
            c.validate().unwrap_err().to_string(),
            "surname must be shorter than or equal to 100 characters"
        );

        let mut c = new_candidate();
        c.surname = "é".repeat(MAX_NAME_LEN);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn patch_validates_only_present_fields() {
        assert!(CandidatePatch::default().validate().is_ok());
        let patch = CandidatePatch {
            years: Some(51),
            ..Default::default()
        };
        assert!(matches!(patch.validate(), Err(CandidateError::InvalidInput(_))));
    }

    #[test]
    fn candidate_serializes_camel_case_timestamps() {
        let now = Utc::now();
        let c = Candidate {
            id: Uuid::now_v7(),
            name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            seniority: Seniority::Junior,
            years: 3,
            availability: false,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["seniority"], "junior");
    }
}
