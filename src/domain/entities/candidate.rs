//! Candidate aggregate.

use chrono::{DateTime, Months, NaiveDate, Utc};

use super::candidate_skill::CandidateSkill;
use super::skill::Skill;
use crate::domain::errors::{DomainError, required_text};
use crate::domain::value_objects::Email;

/// A job candidate together with the skill associations it owns.
///
/// Fields are private: the only ways to change a candidate are the named
/// mutators below, each of which re-validates its input and leaves the
/// aggregate untouched on failure.
///
/// Invariants:
/// - full name is trimmed, non-blank, at most [`Candidate::MAX_NAME_LEN`] chars
/// - the candidate is at least [`Candidate::MIN_AGE`] years old at the time of
///   the last create/update
/// - no skill id appears twice in [`Candidate::skills`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    id: i64,
    full_name: String,
    date_of_birth: NaiveDate,
    contact_number: Option<String>,
    email: Email,
    skills: Vec<CandidateSkill>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Candidate {
    pub const MAX_NAME_LEN: usize = 100;
    pub const MIN_AGE: u32 = 18;

    /// Creates a new, not yet persisted candidate with an empty skill set.
    ///
    /// # Errors
    ///
    /// - [`DomainError::Blank`] / [`DomainError::TooLong`] for the full name
    /// - [`DomainError::Underage`] if younger than [`Candidate::MIN_AGE`]
    /// - [`DomainError::Blank`] / [`DomainError::InvalidEmail`] for the email
    pub fn create(
        full_name: &str,
        date_of_birth: NaiveDate,
        email: &str,
        contact_number: Option<&str>,
    ) -> Result<Self, DomainError> {
        let full_name = required_text(full_name, "Full name", Self::MAX_NAME_LEN)?;
        ensure_adult(date_of_birth, today())?;
        let email = Email::parse(email)?;

        Ok(Self {
            id: 0,
            full_name,
            date_of_birth,
            contact_number: contact_number.map(|c| c.trim().to_string()),
            email,
            skills: Vec::new(),
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    /// Rehydrates a candidate from persisted state without re-validating it.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: i64,
        full_name: String,
        date_of_birth: NaiveDate,
        contact_number: Option<String>,
        email: Email,
        skills: Vec<CandidateSkill>,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            full_name,
            date_of_birth,
            contact_number,
            email,
            skills,
            created_at,
            updated_at,
        }
    }

    /// Replaces name, date of birth and contact number. The email is
    /// immutable after creation and the skill set is left alone.
    ///
    /// # Errors
    ///
    /// Same name and age validation as [`Candidate::create`].
    pub fn update_personal_info(
        &mut self,
        full_name: &str,
        date_of_birth: NaiveDate,
        contact_number: Option<&str>,
    ) -> Result<(), DomainError> {
        let full_name = required_text(full_name, "Full name", Self::MAX_NAME_LEN)?;
        ensure_adult(date_of_birth, today())?;

        self.full_name = full_name;
        self.date_of_birth = date_of_birth;
        self.contact_number = contact_number.map(|c| c.trim().to_string());
        self.touch();
        Ok(())
    }

    /// Associates `skill` with this candidate.
    ///
    /// # Errors
    ///
    /// - [`DomainError::UnsavedSkill`] if the skill has no id yet
    /// - [`DomainError::DuplicateSkill`] if the skill is already associated;
    ///   re-adding is rejected rather than ignored
    pub fn add_skill(&mut self, skill: &Skill) -> Result<(), DomainError> {
        if !skill.is_persisted() {
            return Err(DomainError::UnsavedSkill);
        }

        if self.has_skill(skill.id()) {
            return Err(DomainError::DuplicateSkill {
                skill_id: skill.id(),
            });
        }

        self.skills.push(CandidateSkill::new(self.id, skill.id()));
        self.touch();
        Ok(())
    }

    /// Removes the association with `skill`. Removing a skill the candidate
    /// does not have is a no-op.
    pub fn remove_skill(&mut self, skill: &Skill) {
        let before = self.skills.len();
        self.skills.retain(|cs| cs.skill_id() != skill.id());

        if self.skills.len() != before {
            self.touch();
        }
    }

    pub fn clear_skills(&mut self) {
        self.skills.clear();
        self.touch();
    }

    pub fn has_skill(&self, skill_id: i64) -> bool {
        self.skills.iter().any(|cs| cs.skill_id() == skill_id)
    }

    pub fn skill_ids(&self) -> Vec<i64> {
        self.skills.iter().map(CandidateSkill::skill_id).collect()
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    pub fn contact_number(&self) -> Option<&str> {
        self.contact_number.as_deref()
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn skills(&self) -> &[CandidateSkill] {
        &self.skills
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns the candidate under its store-assigned id, re-keying the
    /// association records to it.
    pub(crate) fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self.skills = self
            .skills
            .iter()
            .map(|cs| CandidateSkill::restore(id, cs.skill_id(), cs.added_at()))
            .collect();
        self
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Too young when `today - MIN_AGE years` is still before the date of birth.
fn ensure_adult(date_of_birth: NaiveDate, today: NaiveDate) -> Result<(), DomainError> {
    let threshold = today
        .checked_sub_months(Months::new(Candidate::MIN_AGE * 12))
        .unwrap_or(NaiveDate::MIN);

    if threshold < date_of_birth {
        return Err(DomainError::Underage {
            min_age: Candidate::MIN_AGE,
        });
    }

    Ok(())
}
