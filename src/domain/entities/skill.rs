//! Skill aggregate.

use chrono::{DateTime, Utc};

use crate::domain::errors::{DomainError, required_text};

/// A named skill that candidates can be associated with.
///
/// The name is always trimmed, non-blank and at most
/// [`Skill::MAX_NAME_LEN`] characters. Name uniqueness across skills is a
/// store-wide rule enforced by [`crate::application::services::SkillService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Skill {
    pub const MAX_NAME_LEN: usize = 100;

    /// Creates a new, not yet persisted skill (id `0`).
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Blank`] or [`DomainError::TooLong`] if the
    /// trimmed name is invalid.
    pub fn create(name: &str) -> Result<Self, DomainError> {
        let name = required_text(name, "Skill name", Self::MAX_NAME_LEN)?;

        Ok(Self {
            id: 0,
            name,
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    /// Rehydrates a skill from persisted state without re-validating it.
    pub fn restore(
        id: i64,
        name: String,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            name,
            created_at,
            updated_at,
        }
    }

    /// Renames the skill.
    ///
    /// # Errors
    ///
    /// Same validation as [`Skill::create`]; on failure the skill is unchanged.
    pub fn update(&mut self, name: &str) -> Result<(), DomainError> {
        self.name = required_text(name, "Skill name", Self::MAX_NAME_LEN)?;
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns true once the store has assigned an id.
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_create_trims_name() {
        let skill = Skill::create("  Rust  ").unwrap();

        assert_eq!(skill.name(), "Rust");
        assert_eq!(skill.id(), 0);
        assert!(!skill.is_persisted());
        assert!(skill.updated_at().is_none());
    }

    #[test]
    fn test_skill_create_blank_name() {
        for name in ["", "   ", "\t\n"] {
            assert_eq!(
                Skill::create(name),
                Err(DomainError::Blank {
                    field: "Skill name"
                })
            );
        }
    }

    #[test]
    fn test_skill_create_name_too_long() {
        assert!(Skill::create(&"a".repeat(100)).is_ok());
        assert!(matches!(
            Skill::create(&"a".repeat(101)),
            Err(DomainError::TooLong { max: 100, .. })
        ));
    }

    #[test]
    fn test_skill_length_checked_after_trim() {
        let padded = format!("  {}  ", "a".repeat(100));
        assert!(Skill::create(&padded).is_ok());
    }

    #[test]
    fn test_skill_update() {
        let mut skill = Skill::restore(3, "Go".to_string(), Utc::now(), None);

        skill.update(" Golang ").unwrap();

        assert_eq!(skill.name(), "Golang");
        assert_eq!(skill.id(), 3);
        assert!(skill.updated_at().is_some());
    }

    #[test]
    fn test_skill_update_invalid_keeps_state() {
        let mut skill = Skill::restore(3, "Go".to_string(), Utc::now(), None);

        assert!(skill.update("   ").is_err());

        assert_eq!(skill.name(), "Go");
        assert!(skill.updated_at().is_none());
    }
}
