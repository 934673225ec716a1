//! API route configuration.

use crate::api::handlers::{
    add_candidate_skill_handler, create_candidate_handler, create_skill_handler,
    delete_candidate_handler, delete_skill_handler, get_candidate_handler,
    get_skill_by_name_handler, get_skill_handler, list_candidates_handler, list_skills_handler,
    remove_candidate_skill_handler, search_candidates_handler, update_candidate_handler,
    update_skill_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET    /skills`                            - List skills
/// - `POST   /skills`                            - Create a skill
/// - `GET    /skills/{id}`                       - Get a skill
/// - `PUT    /skills/{id}`                       - Rename a skill
/// - `DELETE /skills/{id}`                       - Delete a skill
/// - `GET    /skills/name/{name}`                - Get a skill by name
/// - `GET    /candidates`                        - List candidates
/// - `POST   /candidates`                        - Register a candidate
/// - `GET    /candidates/search`                 - Search by name and skills
/// - `GET    /candidates/{id}`                   - Get a candidate
/// - `PUT    /candidates/{id}`                   - Update a candidate
/// - `DELETE /candidates/{id}`                   - Delete a candidate
/// - `POST   /candidates/{id}/skills/{skill_id}` - Assign a skill
/// - `DELETE /candidates/{id}/skills/{skill_id}` - Unassign a skill
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/skills",
            get(list_skills_handler).post(create_skill_handler),
        )
        .route(
            "/skills/{id}",
            get(get_skill_handler)
                .put(update_skill_handler)
                .delete(delete_skill_handler),
        )
        .route("/skills/name/{name}", get(get_skill_by_name_handler))
        .route(
            "/candidates",
            get(list_candidates_handler).post(create_candidate_handler),
        )
        .route("/candidates/search", get(search_candidates_handler))
        .route(
            "/candidates/{id}",
            get(get_candidate_handler)
                .put(update_candidate_handler)
                .delete(delete_candidate_handler),
        )
        .route(
            "/candidates/{id}/skills/{skill_id}",
            post(add_candidate_skill_handler).delete(remove_candidate_skill_handler),
        )
}
