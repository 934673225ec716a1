//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository and Unit of
//! Work patterns. Concrete implementations live in the infrastructure layer.
//!
//! # Architecture
//!
//! - [`Persistence`] opens a [`UnitOfWork`] (one transaction)
//! - the unit of work hands out [`CandidateRepository`] and
//!   [`SkillRepository`] bound to that transaction
//! - [`UnitOfWork::commit`] makes all changes durable at once
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Implementations
//!
//! - `crate::infrastructure::persistence` - PostgreSQL (sqlx)
//! - `crate::infrastructure::memory` - in-memory arena keyed by id

pub mod candidate_repository;
pub mod skill_repository;
pub mod unit_of_work;

pub use candidate_repository::{CandidateFilter, CandidateRepository};
pub use skill_repository::SkillRepository;
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(test)]
pub use candidate_repository::MockCandidateRepository;
#[cfg(test)]
pub use skill_repository::MockSkillRepository;
#[cfg(test)]
pub use unit_of_work::MockPersistence;
