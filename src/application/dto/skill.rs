//! Request and response structures for skill use cases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Skill;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSkillRequest {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSkillRequest {
    pub name: String,
}

/// Skill as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillResponse {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Skill> for SkillResponse {
    fn from(skill: &Skill) -> Self {
        Self {
            id: skill.id(),
            name: skill.name().to_string(),
            created_at: skill.created_at(),
            updated_at: skill.updated_at(),
        }
    }
}
