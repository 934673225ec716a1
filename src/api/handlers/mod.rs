//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod candidates;
pub mod health;
pub mod skills;

pub use candidates::{
    add_candidate_skill_handler, create_candidate_handler, delete_candidate_handler,
    get_candidate_handler, list_candidates_handler, remove_candidate_skill_handler,
    search_candidates_handler, update_candidate_handler,
};
pub use health::health_handler;
pub use skills::{
    create_skill_handler, delete_skill_handler, get_skill_by_name_handler, get_skill_handler,
    list_skills_handler, update_skill_handler,
};
