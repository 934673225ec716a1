//! Repository trait for candidate data access.

use crate::domain::entities::Candidate;
use crate::domain::value_objects::Email;
use crate::error::AppError;
use async_trait::async_trait;

/// Filters for [`CandidateRepository::search`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateFilter {
    /// Substring of the full name. Blank values are ignored.
    pub name: Option<String>,
    /// Skill names; a candidate matches if it has **any** of them.
    /// An empty list disables the filter.
    pub skills: Vec<String>,
}

impl CandidateFilter {
    /// Name filter with surrounding whitespace removed, `None` when blank.
    pub fn name_pattern(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

/// Candidate persistence operations, scoped to one unit of work.
///
/// Every call runs inside the transaction of the [`super::UnitOfWork`] that
/// handed out the repository; nothing is durable before
/// [`super::UnitOfWork::commit`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUnitOfWork`] - PostgreSQL
/// - [`crate::infrastructure::memory::MemoryUnitOfWork`] - in-memory arena
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateRepository: Send {
    /// Loads a candidate's personal data only.
    ///
    /// The association records are **not** loaded; use
    /// [`Self::find_with_skills`] before inspecting or mutating skills, and
    /// never pass the result of this method to [`Self::update`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Candidate>, AppError>;

    /// Loads a candidate together with all of its skill associations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn find_with_skills(&mut self, id: i64) -> Result<Option<Candidate>, AppError>;

    /// Lists every candidate with associations, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn list_with_skills(&mut self) -> Result<Vec<Candidate>, AppError>;

    /// Finds candidates matching `filter`, with associations, ordered by id.
    ///
    /// Name matching follows the store's collation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn search(&mut self, filter: &CandidateFilter) -> Result<Vec<Candidate>, AppError>;

    /// Checks whether another candidate already uses `email`.
    ///
    /// `exclude_id` removes one candidate (normally the one being updated)
    /// from the check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn email_exists(
        &mut self,
        email: &Email,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError>;

    /// Inserts a new candidate with its associations and returns it under
    /// its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already taken.
    /// Returns [`AppError::Store`] on database errors.
    async fn add(&mut self, candidate: &Candidate) -> Result<Candidate, AppError>;

    /// Writes personal data and replaces the stored association set with
    /// `candidate.skills()`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the candidate no longer exists.
    /// Returns [`AppError::Store`] on database errors.
    async fn update(&mut self, candidate: &Candidate) -> Result<(), AppError>;

    /// Deletes a candidate and, by cascade, its associations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the candidate does not exist.
    /// Returns [`AppError::Store`] on database errors.
    async fn delete(&mut self, id: i64) -> Result<(), AppError>;
}
