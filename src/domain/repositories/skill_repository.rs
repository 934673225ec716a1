//! Repository trait for skill data access.

use crate::domain::entities::Skill;
use crate::error::AppError;
use async_trait::async_trait;

/// Skill persistence operations, scoped to one unit of work.
///
/// Name lookups are exact matches under the store's collation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillRepository: Send {
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Skill>, AppError>;

    async fn find_by_name(&mut self, name: &str) -> Result<Option<Skill>, AppError>;

    /// Returns the skills whose names appear in `names`; unknown names are
    /// skipped and each skill appears once.
    async fn find_by_names(&mut self, names: &[String]) -> Result<Vec<Skill>, AppError>;

    /// Returns the skills with the given ids; unknown ids are skipped.
    async fn find_by_ids(&mut self, ids: &[i64]) -> Result<Vec<Skill>, AppError>;

    /// Lists all skills ordered by name.
    async fn list(&mut self) -> Result<Vec<Skill>, AppError>;

    async fn exists_by_name(&mut self, name: &str) -> Result<bool, AppError>;

    /// Inserts a new skill and returns it under its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name is already taken.
    async fn add(&mut self, skill: &Skill) -> Result<Skill, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the skill no longer exists.
    /// Returns [`AppError::Conflict`] if the new name is already taken.
    async fn update(&mut self, skill: &Skill) -> Result<(), AppError>;

    /// Deletes a skill and every candidate association referencing it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the skill does not exist.
    async fn delete(&mut self, id: i64) -> Result<(), AppError>;
}
