//! PostgreSQL repository implementations.
//!
//! One [`PgUnitOfWork`] wraps one database transaction and implements both
//! repository traits on it. Queries are checked at runtime (`query_as` with
//! [`sqlx::FromRow`] rows); the schema lives in `migrations/`.
//!
//! # Modules
//!
//! - [`pg_persistence`] - Pool setup, [`PgPersistence`] and [`PgUnitOfWork`]
//! - [`pg_candidate_repository`] - Candidates and their skill associations
//! - [`pg_skill_repository`] - Skill catalogue

pub mod pg_candidate_repository;
pub mod pg_persistence;
pub mod pg_skill_repository;
mod rows;

pub use pg_persistence::{PgPersistence, PgUnitOfWork, connect_pool};
