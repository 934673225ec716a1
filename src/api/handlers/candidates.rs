//! Handlers for candidate endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::search::SearchQuery;
use crate::application::dto::{CandidateResponse, CreateCandidateRequest, UpdateCandidateRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Lists all candidates with their skills.
///
/// # Endpoint
///
/// `GET /api/candidates`
pub async fn list_candidates_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CandidateResponse>>, AppError> {
    Ok(Json(state.candidate_service.list_candidates().await?))
}

/// Registers a candidate.
///
/// # Endpoint
///
/// `POST /api/candidates`
///
/// # Request Body
///
/// ```json
/// {
///   "full_name": "Ada Lovelace",
///   "date_of_birth": "1990-01-01",
///   "email": "ada@example.com",
///   "contact_number": "+44 20 7946 0000",
///   "skills": ["Go", "Rust"]
/// }
/// ```
///
/// Unknown skill names are ignored.
///
/// # Errors
///
/// Returns 400 on invalid input or when the email is already registered.
pub async fn create_candidate_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateCandidateRequest>,
) -> Result<(StatusCode, Json<CandidateResponse>), AppError> {
    let candidate = state.candidate_service.create_candidate(payload).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

/// # Endpoint
///
/// `GET /api/candidates/{id}`
pub async fn get_candidate_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CandidateResponse>, AppError> {
    Ok(Json(state.candidate_service.get_candidate(id).await?))
}

/// Replaces personal info and the skill set of a candidate.
///
/// # Endpoint
///
/// `PUT /api/candidates/{id}`
///
/// # Errors
///
/// Returns 404 if the candidate does not exist.
/// Returns 400 on invalid input.
pub async fn update_candidate_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCandidateRequest>,
) -> Result<Json<CandidateResponse>, AppError> {
    Ok(Json(
        state.candidate_service.update_candidate(id, payload).await?,
    ))
}

/// # Endpoint
///
/// `DELETE /api/candidates/{id}`
pub async fn delete_candidate_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.candidate_service.delete_candidate(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Assigns a skill to a candidate.
///
/// # Endpoint
///
/// `POST /api/candidates/{id}/skills/{skill_id}`
///
/// # Errors
///
/// Returns 404 if either record does not exist.
/// Returns 400 if the skill is already assigned.
pub async fn add_candidate_skill_handler(
    State(state): State<AppState>,
    Path((id, skill_id)): Path<(i64, i64)>,
) -> Result<Json<CandidateResponse>, AppError> {
    Ok(Json(
        state
            .candidate_service
            .add_skill_to_candidate(id, skill_id)
            .await?,
    ))
}

/// # Endpoint
///
/// `DELETE /api/candidates/{id}/skills/{skill_id}`
pub async fn remove_candidate_skill_handler(
    State(state): State<AppState>,
    Path((id, skill_id)): Path<(i64, i64)>,
) -> Result<Json<CandidateResponse>, AppError> {
    Ok(Json(
        state
            .candidate_service
            .remove_skill_from_candidate(id, skill_id)
            .await?,
    ))
}

/// Searches candidates by name substring and any-of skills.
///
/// # Endpoint
///
/// `GET /api/candidates/search?name=Ada&skills=Go,Rust`
pub async fn search_candidates_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<CandidateResponse>>, AppError> {
    query.validate()?;

    Ok(Json(
        state
            .candidate_service
            .search_candidates(query.into())
            .await?,
    ))
}
