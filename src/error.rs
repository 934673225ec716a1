use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::domain::DomainError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Failure kinds surfaced by the application layer.
///
/// The variant is the kind: the HTTP boundary picks a status code from it and
/// never inspects the message text.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input rejected by an aggregate or value object.
    #[error("{message}")]
    Validation { message: String, details: Value },
    /// A referenced id has no corresponding record.
    #[error("{message}")]
    NotFound { message: String, details: Value },
    /// A uniqueness rule (email, skill name, skill membership) was violated.
    #[error("{message}")]
    Conflict { message: String, details: Value },
    /// The persistence collaborator failed (connectivity, commit, constraint).
    #[error("{message}")]
    Store { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn store(message: impl Into<String>, details: Value) -> Self {
        Self::Store {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code for the failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::Store { .. } => "store_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Validation { .. } | AppError::Conflict { .. } => StatusCode::BAD_REQUEST,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::Store { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Store { message, details } = &self {
            tracing::error!(%details, "Store failure: {}", message);
        }

        let body = ErrorBody { error: self.info() };

        (self.status(), Json(body)).into_response()
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::DuplicateSkill { skill_id } => {
                AppError::conflict(e.to_string(), json!({ "skill_id": skill_id }))
            }
            other => AppError::bad_request(other.to_string(), other.details()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&e).unwrap_or(Value::Null);
        AppError::bad_request("Invalid request parameters", details)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

/// Translates a driver error, turning unique-constraint violations into
/// [`AppError::Conflict`] so a lost check-then-act race still reads as a
/// uniqueness failure.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            let message = match db.constraint() {
                Some("candidates_email_key") => "Candidate with this email already exists",
                Some("skills_name_key") => "Skill with this name already exists",
                Some("candidate_skills_pkey") => "Skill already added to candidate",
                _ => "Unique constraint violation",
            };
            return AppError::conflict(message, json!({ "constraint": db.constraint() }));
        }

        if db.is_foreign_key_violation() {
            return AppError::not_found(
                "Referenced record does not exist",
                json!({ "constraint": db.constraint() }),
            );
        }
    }

    AppError::store("Database error", json!({ "reason": e.to_string() }))
}
