//! Handlers for skill catalogue endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::application::dto::{CreateSkillRequest, SkillResponse, UpdateSkillRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Lists all skills ordered by name.
///
/// # Endpoint
///
/// `GET /api/skills`
pub async fn list_skills_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<SkillResponse>>, AppError> {
    Ok(Json(state.skill_service.list_skills().await?))
}

/// Creates a skill.
///
/// # Endpoint
///
/// `POST /api/skills`
///
/// # Errors
///
/// Returns 400 if the name is invalid or already taken.
pub async fn create_skill_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateSkillRequest>,
) -> Result<(StatusCode, Json<SkillResponse>), AppError> {
    let skill = state.skill_service.create_skill(payload).await?;
    Ok((StatusCode::CREATED, Json(skill)))
}

/// # Endpoint
///
/// `GET /api/skills/{id}`
pub async fn get_skill_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SkillResponse>, AppError> {
    Ok(Json(state.skill_service.get_skill(id).await?))
}

/// # Endpoint
///
/// `GET /api/skills/name/{name}`
pub async fn get_skill_by_name_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SkillResponse>, AppError> {
    Ok(Json(state.skill_service.get_skill_by_name(&name).await?))
}

/// Renames a skill.
///
/// # Endpoint
///
/// `PUT /api/skills/{id}`
///
/// # Errors
///
/// Returns 404 if the skill does not exist.
/// Returns 400 if the name is invalid or taken by another skill.
pub async fn update_skill_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSkillRequest>,
) -> Result<Json<SkillResponse>, AppError> {
    Ok(Json(state.skill_service.update_skill(id, payload).await?))
}

/// Deletes a skill and its candidate associations.
///
/// # Endpoint
///
/// `DELETE /api/skills/{id}`
pub async fn delete_skill_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.skill_service.delete_skill(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
