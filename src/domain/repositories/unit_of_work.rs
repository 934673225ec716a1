//! Transactional boundary for service calls.
//!
//! A service call opens exactly one [`UnitOfWork`] through
//! [`Persistence::begin`], performs all reads and writes through the
//! repositories it hands out, and finishes with a single
//! [`UnitOfWork::commit`]. Dropping a unit of work without committing rolls
//! back everything done through it, so a failed or cancelled call never leaves
//! partial changes behind.

use async_trait::async_trait;

use super::{CandidateRepository, SkillRepository};
use crate::error::AppError;

/// One open transaction with repository access.
#[async_trait]
pub trait UnitOfWork: Send {
    /// Candidate repository bound to this transaction.
    fn candidates(&mut self) -> &mut dyn CandidateRepository;

    /// Skill repository bound to this transaction.
    fn skills(&mut self) -> &mut dyn SkillRepository;

    /// Durably persists every change made through this unit as one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a deferred unique constraint fails
    /// and [`AppError::Store`] on any other store failure. Either way nothing
    /// from this unit is persisted.
    async fn commit(self: Box<Self>) -> Result<(), AppError>;
}

/// Factory for units of work over one backing store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Opens a new unit of work.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if no transaction can be started.
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, AppError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}
