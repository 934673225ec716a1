//! Invariant violations raised by aggregates and value objects.

use serde_json::{Value, json};
use thiserror::Error;

/// Errors raised while constructing or mutating domain objects.
///
/// Every variant is raised before any persistence attempt, so a failed call
/// leaves the aggregate exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{field} is required")]
    Blank { field: &'static str },

    #[error("{field} cannot be longer than {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Candidate must be at least {min_age} years old")]
    Underage { min_age: u32 },

    #[error("Invalid email format")]
    InvalidEmail(String),

    #[error("Skill must be saved before it can be assigned to a candidate")]
    UnsavedSkill,

    #[error("Skill already added to candidate")]
    DuplicateSkill { skill_id: i64 },
}

impl DomainError {
    /// Structured context for API error bodies.
    pub fn details(&self) -> Value {
        match self {
            DomainError::Blank { field } => json!({ "field": field }),
            DomainError::TooLong { field, max } => json!({ "field": field, "max": max }),
            DomainError::Underage { min_age } => json!({ "min_age": min_age }),
            DomainError::InvalidEmail(email) => json!({ "email": email }),
            DomainError::UnsavedSkill => json!({}),
            DomainError::DuplicateSkill { skill_id } => json!({ "skill_id": skill_id }),
        }
    }
}

/// Trims `value` and checks it is non-blank and at most `max` characters.
pub(crate) fn required_text(
    value: &str,
    field: &'static str,
    max: usize,
) -> Result<String, DomainError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(DomainError::Blank { field });
    }

    if trimmed.chars().count() > max {
        return Err(DomainError::TooLong { field, max });
    }

    Ok(trimmed.to_string())
}
