//! In-memory implementation of the persistence contracts.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::entities::{Candidate, CandidateSkill, Skill};
use crate::domain::repositories::{
    CandidateFilter, CandidateRepository, Persistence, SkillRepository, UnitOfWork,
};
use crate::domain::value_objects::Email;
use crate::error::AppError;

#[derive(Debug, Clone)]
struct CandidateRecord {
    full_name: String,
    date_of_birth: NaiveDate,
    contact_number: Option<String>,
    email: Email,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

/// Tables of the arena. Associations are keyed by `(candidate_id, skill_id)`.
#[derive(Debug, Clone, Default)]
struct MemoryState {
    last_candidate_id: i64,
    last_skill_id: i64,
    candidates: BTreeMap<i64, CandidateRecord>,
    skills: BTreeMap<i64, Skill>,
    candidate_skills: BTreeMap<(i64, i64), DateTime<Utc>>,
}

/// Process-local store with the same constraints as the SQL schema:
/// unique candidate email, unique skill name, cascading deletes and
/// foreign-key checks on associations.
///
/// Units of work are serialized: [`Persistence::begin`] waits until the
/// previous unit is committed or dropped. Each unit works on a private copy
/// that replaces the shared state on commit.
#[derive(Clone, Default)]
pub struct MemoryPersistence {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Persistence for MemoryPersistence {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, AppError> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryUnitOfWork { guard, working }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// A unit of work over [`MemoryPersistence`].
pub struct MemoryUnitOfWork {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

impl MemoryUnitOfWork {
    fn load_candidate(&self, id: i64, with_skills: bool) -> Option<Candidate> {
        let record = self.working.candidates.get(&id)?;

        let skills = if with_skills {
            self.working
                .candidate_skills
                .range((id, i64::MIN)..=(id, i64::MAX))
                .map(|(&(candidate_id, skill_id), &added_at)| {
                    CandidateSkill::restore(candidate_id, skill_id, added_at)
                })
                .collect()
        } else {
            Vec::new()
        };

        Some(Candidate::restore(
            id,
            record.full_name.clone(),
            record.date_of_birth,
            record.contact_number.clone(),
            record.email.clone(),
            skills,
            record.created_at,
            record.updated_at,
        ))
    }

    fn email_taken(&self, email: &Email, exclude_id: Option<i64>) -> bool {
        self.working
            .candidates
            .iter()
            .any(|(&id, record)| Some(id) != exclude_id && &record.email == email)
    }

    fn name_taken(&self, name: &str, exclude_id: Option<i64>) -> bool {
        self.working
            .skills
            .values()
            .any(|skill| Some(skill.id()) != exclude_id && skill.name() == name)
    }

    fn write_associations(
        &mut self,
        candidate_id: i64,
        skills: &[CandidateSkill],
    ) -> Result<(), AppError> {
        self.working
            .candidate_skills
            .retain(|&(owner, _), _| owner != candidate_id);

        for cs in skills {
            if !self.working.skills.contains_key(&cs.skill_id()) {
                return Err(AppError::not_found(
                    "Referenced record does not exist",
                    json!({ "skill_id": cs.skill_id() }),
                ));
            }
            self.working
                .candidate_skills
                .insert((candidate_id, cs.skill_id()), cs.added_at());
        }

        Ok(())
    }

    fn candidate_has_any_skill(&self, candidate_id: i64, names: &[String]) -> bool {
        self.working
            .candidate_skills
            .range((candidate_id, i64::MIN)..=(candidate_id, i64::MAX))
            .filter_map(|(&(_, skill_id), _)| self.working.skills.get(&skill_id))
            .any(|skill| names.iter().any(|n| n == skill.name()))
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    fn candidates(&mut self) -> &mut dyn CandidateRepository {
        self
    }

    fn skills(&mut self) -> &mut dyn SkillRepository {
        self
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let MemoryUnitOfWork { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}

#[async_trait]
impl CandidateRepository for MemoryUnitOfWork {
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Candidate>, AppError> {
        Ok(self.load_candidate(id, false))
    }

    async fn find_with_skills(&mut self, id: i64) -> Result<Option<Candidate>, AppError> {
        Ok(self.load_candidate(id, true))
    }

    async fn list_with_skills(&mut self) -> Result<Vec<Candidate>, AppError> {
        Ok(self
            .working
            .candidates
            .keys()
            .filter_map(|&id| self.load_candidate(id, true))
            .collect())
    }

    async fn search(&mut self, filter: &CandidateFilter) -> Result<Vec<Candidate>, AppError> {
        let name = filter.name_pattern();

        Ok(self
            .working
            .candidates
            .iter()
            .filter(|(_, record)| name.is_none_or(|n| record.full_name.contains(n)))
            .filter(|&(&id, _)| {
                filter.skills.is_empty() || self.candidate_has_any_skill(id, &filter.skills)
            })
            .filter_map(|(&id, _)| self.load_candidate(id, true))
            .collect())
    }

    async fn email_exists(
        &mut self,
        email: &Email,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        Ok(self.email_taken(email, exclude_id))
    }

    async fn add(&mut self, candidate: &Candidate) -> Result<Candidate, AppError> {
        if self.email_taken(candidate.email(), None) {
            return Err(AppError::conflict(
                "Candidate with this email already exists",
                json!({ "constraint": "candidates_email_key" }),
            ));
        }

        let id = self.working.last_candidate_id + 1;
        self.working.candidates.insert(
            id,
            CandidateRecord {
                full_name: candidate.full_name().to_string(),
                date_of_birth: candidate.date_of_birth(),
                contact_number: candidate.contact_number().map(str::to_string),
                email: candidate.email().clone(),
                created_at: candidate.created_at(),
                updated_at: candidate.updated_at(),
            },
        );
        self.write_associations(id, candidate.skills())?;
        self.working.last_candidate_id = id;

        Ok(candidate.clone().with_id(id))
    }

    async fn update(&mut self, candidate: &Candidate) -> Result<(), AppError> {
        let id = candidate.id();

        if !self.working.candidates.contains_key(&id) {
            return Err(AppError::not_found(
                "Candidate not found",
                json!({ "id": id }),
            ));
        }

        if self.email_taken(candidate.email(), Some(id)) {
            return Err(AppError::conflict(
                "Candidate with this email already exists",
                json!({ "constraint": "candidates_email_key" }),
            ));
        }

        self.working.candidates.insert(
            id,
            CandidateRecord {
                full_name: candidate.full_name().to_string(),
                date_of_birth: candidate.date_of_birth(),
                contact_number: candidate.contact_number().map(str::to_string),
                email: candidate.email().clone(),
                created_at: candidate.created_at(),
                updated_at: candidate.updated_at(),
            },
        );
        self.write_associations(id, candidate.skills())
    }

    async fn delete(&mut self, id: i64) -> Result<(), AppError> {
        if self.working.candidates.remove(&id).is_none() {
            return Err(AppError::not_found(
                "Candidate not found",
                json!({ "id": id }),
            ));
        }

        self.working
            .candidate_skills
            .retain(|&(owner, _), _| owner != id);
        Ok(())
    }
}

#[async_trait]
impl SkillRepository for MemoryUnitOfWork {
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Skill>, AppError> {
        Ok(self.working.skills.get(&id).cloned())
    }

    async fn find_by_name(&mut self, name: &str) -> Result<Option<Skill>, AppError> {
        Ok(self
            .working
            .skills
            .values()
            .find(|skill| skill.name() == name)
            .cloned())
    }

    async fn find_by_names(&mut self, names: &[String]) -> Result<Vec<Skill>, AppError> {
        Ok(self
            .working
            .skills
            .values()
            .filter(|skill| names.iter().any(|n| n == skill.name()))
            .cloned()
            .collect())
    }

    async fn find_by_ids(&mut self, ids: &[i64]) -> Result<Vec<Skill>, AppError> {
        Ok(self
            .working
            .skills
            .values()
            .filter(|skill| ids.contains(&skill.id()))
            .cloned()
            .collect())
    }

    async fn list(&mut self) -> Result<Vec<Skill>, AppError> {
        let mut skills: Vec<Skill> = self.working.skills.values().cloned().collect();
        skills.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(skills)
    }

    async fn exists_by_name(&mut self, name: &str) -> Result<bool, AppError> {
        Ok(self.name_taken(name, None))
    }

    async fn add(&mut self, skill: &Skill) -> Result<Skill, AppError> {
        if self.name_taken(skill.name(), None) {
            return Err(AppError::conflict(
                "Skill with this name already exists",
                json!({ "constraint": "skills_name_key" }),
            ));
        }

        let id = self.working.last_skill_id + 1;
        let stored = Skill::restore(
            id,
            skill.name().to_string(),
            skill.created_at(),
            skill.updated_at(),
        );
        self.working.skills.insert(id, stored.clone());
        self.working.last_skill_id = id;

        Ok(stored)
    }

    async fn update(&mut self, skill: &Skill) -> Result<(), AppError> {
        if !self.working.skills.contains_key(&skill.id()) {
            return Err(AppError::not_found(
                "Skill not found",
                json!({ "id": skill.id() }),
            ));
        }

        if self.name_taken(skill.name(), Some(skill.id())) {
            return Err(AppError::conflict(
                "Skill with this name already exists",
                json!({ "constraint": "skills_name_key" }),
            ));
        }

        self.working.skills.insert(skill.id(), skill.clone());
        Ok(())
    }

    async fn delete(&mut self, id: i64) -> Result<(), AppError> {
        if self.working.skills.remove(&id).is_none() {
            return Err(AppError::not_found("Skill not found", json!({ "id": id })));
        }

        self.working
            .candidate_skills
            .retain(|&(_, skill_id), _| skill_id != id);
        Ok(())
    }
}
