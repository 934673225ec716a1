//! Request and response structures for candidate use cases.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::skill::SkillResponse;
use crate::domain::{Candidate, Skill};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCandidateRequest {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub email: String,
    #[serde(default)]
    pub contact_number: Option<String>,
    /// Names of existing skills to attach. Unknown names are skipped.
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Personal-info update. There is no email field: the email is fixed when the
/// candidate is created.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCandidateRequest {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub contact_number: Option<String>,
    /// Complete replacement skill set (names). Unknown names are skipped.
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CandidateSearchRequest {
    pub name: Option<String>,
    /// Matches candidates having any of these skills.
    pub skills: Vec<String>,
}

/// Candidate as returned to callers, with skills resolved to names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateResponse {
    pub id: i64,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub contact_number: Option<String>,
    pub email: String,
    pub skills: Vec<SkillResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CandidateResponse {
    /// Builds the response, resolving each association through `catalogue`
    /// (skills keyed by id). Associations missing from the catalogue are
    /// left out.
    pub fn build(candidate: &Candidate, catalogue: &HashMap<i64, Skill>) -> Self {
        let mut skills: Vec<SkillResponse> = candidate
            .skills()
            .iter()
            .filter_map(|cs| catalogue.get(&cs.skill_id()))
            .map(SkillResponse::from)
            .collect();
        skills.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            id: candidate.id(),
            full_name: candidate.full_name().to_string(),
            date_of_birth: candidate.date_of_birth(),
            contact_number: candidate.contact_number().map(str::to_string),
            email: candidate.email().to_string(),
            skills,
            created_at: candidate.created_at(),
            updated_at: candidate.updated_at(),
        }
    }
}
