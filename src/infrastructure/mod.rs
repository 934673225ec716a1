//! Infrastructure layer for external integrations.
//!
//! This layer implements the persistence contracts defined by the domain
//! layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL unit of work and repositories
//! - [`memory`] - In-memory unit of work with the same constraints

pub mod memory;
pub mod persistence;
