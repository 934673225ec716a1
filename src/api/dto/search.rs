//! Query parameters for candidate search.

use serde::Deserialize;
use validator::Validate;

use crate::application::dto::CandidateSearchRequest;

/// `GET /api/candidates/search?name=Ada&skills=Go,Rust`
///
/// `skills` is a comma-separated list; a candidate matches if it has any of
/// them.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(max = 100))]
    pub name: Option<String>,

    #[validate(length(max = 2000))]
    pub skills: Option<String>,
}

impl From<SearchQuery> for CandidateSearchRequest {
    fn from(query: SearchQuery) -> Self {
        let skills = query
            .skills
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        CandidateSearchRequest {
            name: query.name,
            skills,
        }
    }
}
