//! Application layer services implementing the use cases.
//!
//! Services open one unit of work per call, drive the aggregates through
//! their validating operations and commit once. They accept and return the
//! plain structures in [`dto`], which the HTTP handlers and the admin CLI
//! share.
//!
//! # Available Services
//!
//! - [`services::candidate_service::CandidateService`] - Candidate registration, skills and search
//! - [`services::skill_service::SkillService`] - Skill catalogue maintenance

pub mod dto;
pub mod services;
