//! Skill catalogue use cases.

use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::dto::{CreateSkillRequest, SkillResponse, UpdateSkillRequest};
use crate::domain::entities::Skill;
use crate::domain::repositories::Persistence;
use crate::error::AppError;

/// Service for maintaining the skill catalogue.
///
/// Skill names are unique (exact match after trimming). Deleting a skill
/// also removes it from every candidate that had it.
pub struct SkillService {
    persistence: Arc<dyn Persistence>,
}

impl SkillService {
    pub fn new(persistence: Arc<dyn Persistence>) -> Self {
        Self { persistence }
    }

    /// Adds a skill to the catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is blank or too long.
    /// Returns [`AppError::Conflict`] if a skill with the same name exists.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn create_skill(&self, request: CreateSkillRequest) -> Result<SkillResponse, AppError> {
        let skill = Skill::create(&request.name)?;

        let mut uow = self.persistence.begin().await?;

        if uow.skills().exists_by_name(skill.name()).await? {
            warn!(name = skill.name(), "Skill name already taken");
            return Err(name_conflict(skill.name()));
        }

        let created = uow.skills().add(&skill).await?;
        uow.commit().await?;

        info!(skill_id = created.id(), name = created.name(), "Skill created");
        Ok(SkillResponse::from(&created))
    }

    /// Renames a skill.
    ///
    /// Keeping the current name is not a conflict.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the skill does not exist.
    /// Returns [`AppError::Validation`] if the new name is blank or too long.
    /// Returns [`AppError::Conflict`] if another skill already has the name.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn update_skill(
        &self,
        id: i64,
        request: UpdateSkillRequest,
    ) -> Result<SkillResponse, AppError> {
        let mut uow = self.persistence.begin().await?;

        let mut skill = uow
            .skills()
            .find_by_id(id)
            .await?
            .ok_or_else(|| skill_not_found(id))?;

        skill.update(&request.name)?;

        let taken = uow
            .skills()
            .find_by_name(skill.name())
            .await?
            .is_some_and(|other| other.id() != id);

        if taken {
            warn!(skill_id = id, name = skill.name(), "Skill name already taken");
            return Err(name_conflict(skill.name()));
        }

        uow.skills().update(&skill).await?;
        uow.commit().await?;

        info!(skill_id = id, name = skill.name(), "Skill updated");
        Ok(SkillResponse::from(&skill))
    }

    /// Deletes a skill and removes it from all candidates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the skill does not exist.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn delete_skill(&self, id: i64) -> Result<(), AppError> {
        let mut uow = self.persistence.begin().await?;

        if uow.skills().find_by_id(id).await?.is_none() {
            return Err(skill_not_found(id));
        }

        uow.skills().delete(id).await?;
        uow.commit().await?;

        info!(skill_id = id, "Skill deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the skill does not exist.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn get_skill(&self, id: i64) -> Result<SkillResponse, AppError> {
        let mut uow = self.persistence.begin().await?;

        uow.skills()
            .find_by_id(id)
            .await?
            .map(|s| SkillResponse::from(&s))
            .ok_or_else(|| skill_not_found(id))
    }

    /// Looks a skill up by its exact name. Surrounding whitespace in `name`
    /// is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no skill has that name.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn get_skill_by_name(&self, name: &str) -> Result<SkillResponse, AppError> {
        let name = name.trim();
        let mut uow = self.persistence.begin().await?;

        uow.skills()
            .find_by_name(name)
            .await?
            .map(|s| SkillResponse::from(&s))
            .ok_or_else(|| AppError::not_found("Skill not found", json!({ "name": name })))
    }

    /// Lists the catalogue ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    pub async fn list_skills(&self) -> Result<Vec<SkillResponse>, AppError> {
        let mut uow = self.persistence.begin().await?;

        Ok(uow
            .skills()
            .list()
            .await?
            .iter()
            .map(SkillResponse::from)
            .collect())
    }
}

fn skill_not_found(id: i64) -> AppError {
    AppError::not_found("Skill not found", json!({ "id": id }))
}

fn name_conflict(name: &str) -> AppError {
    AppError::conflict(
        "Skill with this name already exists",
        json!({ "name": name }),
    )
}
