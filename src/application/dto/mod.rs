//! Plain request/response structures exchanged with the calling layer.

pub mod candidate;
pub mod skill;

pub use candidate::{
    CandidateResponse, CandidateSearchRequest, CreateCandidateRequest, UpdateCandidateRequest,
};
pub use skill::{CreateSkillRequest, SkillResponse, UpdateSkillRequest};
