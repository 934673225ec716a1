//! Candidate-to-skill association record.

use chrono::{DateTime, Utc};

/// Membership of one skill in one candidate's skill set.
///
/// Identity is the `(candidate_id, skill_id)` pair. The record holds ids only;
/// the skill itself is resolved by id lookup. New records are created
/// exclusively by [`crate::domain::Candidate::add_skill`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSkill {
    candidate_id: i64,
    skill_id: i64,
    added_at: DateTime<Utc>,
}

impl CandidateSkill {
    pub(crate) fn new(candidate_id: i64, skill_id: i64) -> Self {
        Self {
            candidate_id,
            skill_id,
            added_at: Utc::now(),
        }
    }

    /// Rehydrates a persisted association.
    pub fn restore(candidate_id: i64, skill_id: i64, added_at: DateTime<Utc>) -> Self {
        Self {
            candidate_id,
            skill_id,
            added_at,
        }
    }

    /// Owning candidate id; `0` while the candidate is not yet persisted.
    pub fn candidate_id(&self) -> i64 {
        self.candidate_id
    }

    pub fn skill_id(&self) -> i64 {
        self.skill_id
    }

    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }
}
