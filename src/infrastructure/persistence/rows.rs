//! Row types shared by the PostgreSQL repositories.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use sqlx::FromRow;

use crate::domain::entities::{Candidate, CandidateSkill, Skill};
use crate::domain::value_objects::Email;
use crate::error::AppError;

#[derive(Debug, FromRow)]
pub(super) struct SkillRow {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<SkillRow> for Skill {
    fn from(row: SkillRow) -> Self {
        Skill::restore(row.id, row.name, row.created_at, row.updated_at)
    }
}

#[derive(Debug, FromRow)]
pub(super) struct CandidateRow {
    pub id: i64,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub contact_number: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CandidateRow {
    /// Builds the aggregate with the given associations.
    ///
    /// Emails are stored normalized; one that no longer parses is reported as
    /// a store failure rather than a validation error.
    pub fn into_candidate(self, skills: Vec<CandidateSkill>) -> Result<Candidate, AppError> {
        let email = Email::parse(&self.email).map_err(|e| {
            AppError::store(
                "Stored candidate email is invalid",
                json!({ "id": self.id, "reason": e.to_string() }),
            )
        })?;

        Ok(Candidate::restore(
            self.id,
            self.full_name,
            self.date_of_birth,
            self.contact_number,
            email,
            skills,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[derive(Debug, FromRow)]
pub(super) struct CandidateSkillRow {
    pub candidate_id: i64,
    pub skill_id: i64,
    pub added_at: DateTime<Utc>,
}

impl From<CandidateSkillRow> for CandidateSkill {
    fn from(row: CandidateSkillRow) -> Self {
        CandidateSkill::restore(row.candidate_id, row.skill_id, row.added_at)
    }
}
