//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Candidate`] - Aggregate root owning its skill associations
//! - [`CandidateSkill`] - `(candidate_id, skill_id)` association record
//! - [`Skill`] - Independently managed skill catalogue entry
//!
//! # Design Pattern
//!
//! Entities are opaque: fields are private, new instances come from a
//! validating `create` factory, and persisted state is rehydrated through
//! `restore`. Associations reference skills by id only, so there are no
//! back-pointers between aggregates.

pub mod candidate;
pub mod candidate_skill;
pub mod skill;

pub use candidate::Candidate;
pub use candidate_skill::CandidateSkill;
pub use skill::Skill;
