//! Business logic services for the application layer.

pub mod candidate_service;
pub mod skill_service;

pub use candidate_service::CandidateService;
pub use skill_service::SkillService;
