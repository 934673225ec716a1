//! Domain layer containing business entities and rules.
//!
//! # Architecture
//!
//! - [`value_objects`] - Validated scalars ([`Email`])
//! - [`entities`] - Aggregates ([`Candidate`], [`Skill`]) and the
//!   [`CandidateSkill`] association record
//! - [`repositories`] - Persistence and unit-of-work contracts
//! - [`errors`] - [`DomainError`] raised by invariant checks
//!
//! # Design Principles
//!
//! - Local invariants (name length, age, email shape, no duplicate skill) are
//!   enforced by the aggregates themselves
//! - Global invariants (unique email, unique skill name) need a store lookup
//!   and are enforced by [`crate::application::services`]

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod value_objects;

pub use entities::{Candidate, CandidateSkill, Skill};
pub use errors::DomainError;
pub use value_objects::Email;
