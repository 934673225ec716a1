//! Candidate use cases.

use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::dto::{
    CandidateResponse, CandidateSearchRequest, CreateCandidateRequest, UpdateCandidateRequest,
};
use crate::domain::entities::{Candidate, Skill};
use crate::domain::repositories::{CandidateFilter, Persistence, UnitOfWork};
use crate::error::AppError;

/// Service orchestrating candidate registration, updates, skill assignment
/// and search.
///
/// Each call opens one unit of work and commits it once at the end; on any
/// error the unit is dropped and nothing is persisted.
pub struct CandidateService {
    persistence: Arc<dyn Persistence>,
}

impl CandidateService {
    pub fn new(persistence: Arc<dyn Persistence>) -> Self {
        Self { persistence }
    }

    /// Registers a new candidate.
    ///
    /// Requested skill names that do not exist in the catalogue are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if name, date of birth or email are
    /// invalid.
    /// Returns [`AppError::Conflict`] if the normalized email is already
    /// registered.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn create_candidate(
        &self,
        request: CreateCandidateRequest,
    ) -> Result<CandidateResponse, AppError> {
        let mut candidate = Candidate::create(
            &request.full_name,
            request.date_of_birth,
            &request.email,
            request.contact_number.as_deref(),
        )?;

        let mut uow = self.persistence.begin().await?;

        if uow
            .candidates()
            .email_exists(candidate.email(), None)
            .await?
        {
            warn!(email = %candidate.email(), "Candidate email already registered");
            return Err(email_conflict(&candidate));
        }

        let skills = resolve_skills(uow.as_mut(), &request.skills).await?;
        for skill in &skills {
            candidate.add_skill(skill)?;
        }

        let created = uow.candidates().add(&candidate).await?;
        uow.commit().await?;

        info!(
            candidate_id = created.id(),
            skills = skills.len(),
            "Candidate created"
        );

        Ok(CandidateResponse::build(&created, &index(skills)))
    }

    /// Replaces a candidate's personal info and skill set.
    ///
    /// The skill set is replaced, not merged: skills not named in the request
    /// are removed. The email cannot be changed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the candidate does not exist.
    /// Returns [`AppError::Conflict`] if another candidate holds the same email.
    /// Returns [`AppError::Validation`] if the new personal info is invalid.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn update_candidate(
        &self,
        id: i64,
        request: UpdateCandidateRequest,
    ) -> Result<CandidateResponse, AppError> {
        let mut uow = self.persistence.begin().await?;

        let mut candidate = uow
            .candidates()
            .find_with_skills(id)
            .await?
            .ok_or_else(|| candidate_not_found(id))?;

        if uow
            .candidates()
            .email_exists(candidate.email(), Some(id))
            .await?
        {
            warn!(candidate_id = id, email = %candidate.email(), "Email held by another candidate");
            return Err(email_conflict(&candidate));
        }

        candidate.update_personal_info(
            &request.full_name,
            request.date_of_birth,
            request.contact_number.as_deref(),
        )?;

        let skills = resolve_skills(uow.as_mut(), &request.skills).await?;
        candidate.clear_skills();
        for skill in &skills {
            candidate.add_skill(skill)?;
        }

        uow.candidates().update(&candidate).await?;
        uow.commit().await?;

        info!(candidate_id = id, skills = skills.len(), "Candidate updated");

        Ok(CandidateResponse::build(&candidate, &index(skills)))
    }

    /// Deletes a candidate together with its skill associations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the candidate does not exist.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn delete_candidate(&self, id: i64) -> Result<(), AppError> {
        let mut uow = self.persistence.begin().await?;

        if uow.candidates().find_by_id(id).await?.is_none() {
            return Err(candidate_not_found(id));
        }

        uow.candidates().delete(id).await?;
        uow.commit().await?;

        info!(candidate_id = id, "Candidate deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the candidate does not exist.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn get_candidate(&self, id: i64) -> Result<CandidateResponse, AppError> {
        let mut uow = self.persistence.begin().await?;

        let candidate = uow
            .candidates()
            .find_with_skills(id)
            .await?
            .ok_or_else(|| candidate_not_found(id))?;

        let catalogue = load_catalogue(uow.as_mut(), std::slice::from_ref(&candidate)).await?;
        Ok(CandidateResponse::build(&candidate, &catalogue))
    }

    /// Lists all candidates with their skills, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    pub async fn list_candidates(&self) -> Result<Vec<CandidateResponse>, AppError> {
        let mut uow = self.persistence.begin().await?;

        let candidates = uow.candidates().list_with_skills().await?;
        let catalogue = load_catalogue(uow.as_mut(), &candidates).await?;

        Ok(candidates
            .iter()
            .map(|c| CandidateResponse::build(c, &catalogue))
            .collect())
    }

    /// Assigns an existing skill to a candidate and returns the reloaded
    /// candidate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the candidate or the skill does not
    /// exist.
    /// Returns [`AppError::Conflict`] if the skill is already assigned.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn add_skill_to_candidate(
        &self,
        candidate_id: i64,
        skill_id: i64,
    ) -> Result<CandidateResponse, AppError> {
        let mut uow = self.persistence.begin().await?;
        let (mut candidate, skill) = load_pair(uow.as_mut(), candidate_id, skill_id).await?;

        if let Err(e) = candidate.add_skill(&skill) {
            warn!(candidate_id, skill_id, "Rejected skill assignment: {}", e);
            return Err(e.into());
        }

        uow.candidates().update(&candidate).await?;
        let response = reload(uow.as_mut(), candidate_id).await?;
        uow.commit().await?;

        info!(candidate_id, skill_id, "Skill added to candidate");
        Ok(response)
    }

    /// Removes a skill from a candidate and returns the reloaded candidate.
    ///
    /// Removing a skill the candidate does not have succeeds without changes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the candidate or the skill does not
    /// exist.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn remove_skill_from_candidate(
        &self,
        candidate_id: i64,
        skill_id: i64,
    ) -> Result<CandidateResponse, AppError> {
        let mut uow = self.persistence.begin().await?;
        let (mut candidate, skill) = load_pair(uow.as_mut(), candidate_id, skill_id).await?;

        candidate.remove_skill(&skill);

        uow.candidates().update(&candidate).await?;
        let response = reload(uow.as_mut(), candidate_id).await?;
        uow.commit().await?;

        info!(candidate_id, skill_id, "Skill removed from candidate");
        Ok(response)
    }

    /// Searches candidates by name substring and skills.
    ///
    /// A blank name and an empty skill list each disable their filter. A
    /// candidate matches the skill filter if it has **any** of the named
    /// skills.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    pub async fn search_candidates(
        &self,
        request: CandidateSearchRequest,
    ) -> Result<Vec<CandidateResponse>, AppError> {
        let filter = CandidateFilter {
            name: request.name,
            skills: clean_names(&request.skills),
        };

        let mut uow = self.persistence.begin().await?;

        let candidates = uow.candidates().search(&filter).await?;
        let catalogue = load_catalogue(uow.as_mut(), &candidates).await?;

        Ok(candidates
            .iter()
            .map(|c| CandidateResponse::build(c, &catalogue))
            .collect())
    }
}

fn candidate_not_found(id: i64) -> AppError {
    AppError::not_found("Candidate not found", json!({ "id": id }))
}

fn email_conflict(candidate: &Candidate) -> AppError {
    AppError::conflict(
        "Candidate with this email already exists",
        json!({ "email": candidate.email().as_str() }),
    )
}

/// Trimmed, non-blank names in request order, without repeats.
fn clean_names(names: &[String]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(names.len());

    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        if !cleaned.iter().any(|c| c == name) {
            cleaned.push(name.to_string());
        }
    }

    cleaned
}

/// Looks up existing skills by name; unknown names are skipped.
async fn resolve_skills(
    uow: &mut dyn UnitOfWork,
    names: &[String],
) -> Result<Vec<Skill>, AppError> {
    let names = clean_names(names);
    if names.is_empty() {
        return Ok(Vec::new());
    }

    uow.skills().find_by_names(&names).await
}

/// Loads every skill referenced by `candidates`, keyed by id.
async fn load_catalogue(
    uow: &mut dyn UnitOfWork,
    candidates: &[Candidate],
) -> Result<HashMap<i64, Skill>, AppError> {
    let mut ids: Vec<i64> = candidates.iter().flat_map(Candidate::skill_ids).collect();
    ids.sort_unstable();
    ids.dedup();

    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let skills = uow.skills().find_by_ids(&ids).await?;
    Ok(index(skills))
}

fn index(skills: Vec<Skill>) -> HashMap<i64, Skill> {
    skills.into_iter().map(|s| (s.id(), s)).collect()
}

async fn load_pair(
    uow: &mut dyn UnitOfWork,
    candidate_id: i64,
    skill_id: i64,
) -> Result<(Candidate, Skill), AppError> {
    let candidate = uow
        .candidates()
        .find_with_skills(candidate_id)
        .await?
        .ok_or_else(|| candidate_not_found(candidate_id))?;

    let skill = uow
        .skills()
        .find_by_id(skill_id)
        .await?
        .ok_or_else(|| AppError::not_found("Skill not found", json!({ "id": skill_id })))?;

    Ok((candidate, skill))
}

async fn reload(uow: &mut dyn UnitOfWork, id: i64) -> Result<CandidateResponse, AppError> {
    let candidate = uow
        .candidates()
        .find_with_skills(id)
        .await?
        .ok_or_else(|| candidate_not_found(id))?;

    let catalogue = load_catalogue(uow, std::slice::from_ref(&candidate)).await?;
    Ok(CandidateResponse::build(&candidate, &catalogue))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::CreateSkillRequest;
    use crate::application::services::SkillService;
    use crate::application::services::test_support::StubUnitOfWork;
    use crate::domain::repositories::MockPersistence;
    use crate::infrastructure::memory::MemoryPersistence;
    use chrono::NaiveDate;

    fn services() -> (CandidateService, SkillService) {
        let persistence: Arc<dyn Persistence> = Arc::new(MemoryPersistence::new());
        (
            CandidateService::new(persistence.clone()),
            SkillService::new(persistence),
        )
    }

    fn create_request(name: &str, email: &str, skills: &[&str]) -> CreateCandidateRequest {
        CreateCandidateRequest {
            full_name: name.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            email: email.to_string(),
            contact_number: None,
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    async fn add_skill(skills: &SkillService, name: &str) -> i64 {
        skills
            .create_skill(CreateSkillRequest {
                name: name.to_string(),
            })
            .await
            .unwrap()
            .id
    }

    fn by_skills(names: &[&str]) -> CandidateSearchRequest {
        CandidateSearchRequest {
            name: None,
            skills: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_assign_search_and_remove_skill() {
        let (candidates, skills) = services();
        let go = add_skill(&skills, "Go").await;

        let ada = candidates
            .create_candidate(create_request("Ada Lovelace", "ada@example.com", &[]))
            .await
            .unwrap();

        let updated = candidates
            .add_skill_to_candidate(ada.id, go)
            .await
            .unwrap();
        assert_eq!(updated.skills.len(), 1);
        assert_eq!(updated.skills[0].name, "Go");

        let found = candidates
            .search_candidates(by_skills(&["Go"]))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ada.id);

        let updated = candidates
            .remove_skill_from_candidate(ada.id, go)
            .await
            .unwrap();
        assert!(updated.skills.is_empty());

        let found = candidates
            .search_candidates(by_skills(&["Go"]))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_email_conflict_is_case_insensitive() {
        let (candidates, _) = services();

        candidates
            .create_candidate(create_request("First", "x@y.com", &[]))
            .await
            .unwrap();
        let result = candidates
            .create_candidate(create_request("Second", "X@Y.com", &[]))
            .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_create_resolves_known_skills_and_skips_unknown() {
        let (candidates, skills) = services();
        add_skill(&skills, "Rust").await;

        let created = candidates
            .create_candidate(create_request(
                "  Ada Lovelace ",
                " Ada@Example.com ",
                &["Rust", "Cobol", "Rust"],
            ))
            .await
            .unwrap();

        assert_eq!(created.full_name, "Ada Lovelace");
        assert_eq!(created.email, "ada@example.com");
        let names: Vec<_> = created.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Rust"]);
    }

    #[tokio::test]
    async fn test_create_underage_is_validation_error() {
        let (candidates, _) = services();
        let mut request = create_request("Kid", "kid@example.com", &[]);
        request.date_of_birth = chrono::Utc::now().date_naive();

        let result = candidates.create_candidate(request).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
        assert!(candidates.list_candidates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_skill_set() {
        let (candidates, skills) = services();
        add_skill(&skills, "Go").await;
        add_skill(&skills, "Rust").await;
        add_skill(&skills, "SQL").await;

        let ada = candidates
            .create_candidate(create_request("Ada", "ada@example.com", &["Go", "Rust"]))
            .await
            .unwrap();

        let updated = candidates
            .update_candidate(
                ada.id,
                UpdateCandidateRequest {
                    full_name: "Ada King".to_string(),
                    date_of_birth: ada.date_of_birth,
                    contact_number: Some(" 555-0100 ".to_string()),
                    skills: vec!["SQL".to_string()],
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.full_name, "Ada King");
        assert_eq!(updated.email, "ada@example.com");
        assert_eq!(updated.contact_number.as_deref(), Some("555-0100"));
        let names: Vec<_> = updated.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["SQL"]);

        let reloaded = candidates.get_candidate(ada.id).await.unwrap();
        assert_eq!(reloaded.skills, updated.skills);
    }

    #[tokio::test]
    async fn test_update_unknown_candidate_is_not_found() {
        let (candidates, _) = services();

        let result = candidates
            .update_candidate(
                42,
                UpdateCandidateRequest {
                    full_name: "Nobody".to_string(),
                    date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
                    contact_number: None,
                    skills: vec![],
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_add_skill_twice_is_conflict() {
        let (candidates, skills) = services();
        let go = add_skill(&skills, "Go").await;
        let ada = candidates
            .create_candidate(create_request("Ada", "ada@example.com", &["Go"]))
            .await
            .unwrap();

        let result = candidates.add_skill_to_candidate(ada.id, go).await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
        assert_eq!(candidates.get_candidate(ada.id).await.unwrap().skills.len(), 1);
    }

    #[tokio::test]
    async fn test_add_unknown_skill_is_not_found() {
        let (candidates, _) = services();
        let ada = candidates
            .create_candidate(create_request("Ada", "ada@example.com", &[]))
            .await
            .unwrap();

        let result = candidates.add_skill_to_candidate(ada.id, 99).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));

        let result = candidates.remove_skill_from_candidate(99, 1).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_candidate() {
        let (candidates, _) = services();
        let ada = candidates
            .create_candidate(create_request("Ada", "ada@example.com", &[]))
            .await
            .unwrap();

        candidates.delete_candidate(ada.id).await.unwrap();

        assert!(matches!(
            candidates.get_candidate(ada.id).await,
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            candidates.delete_candidate(ada.id).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_search_by_name_substring() {
        let (candidates, _) = services();
        candidates
            .create_candidate(create_request("Ada Lovelace", "ada@example.com", &[]))
            .await
            .unwrap();
        candidates
            .create_candidate(create_request("Grace Hopper", "grace@example.com", &[]))
            .await
            .unwrap();

        let found = candidates
            .search_candidates(CandidateSearchRequest {
                name: Some("Love".to_string()),
                skills: vec![],
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].full_name, "Ada Lovelace");

        let all = candidates
            .search_candidates(CandidateSearchRequest {
                name: Some("   ".to_string()),
                skills: vec![" ".to_string()],
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_create_conflict_never_inserts() {
        let mut uow = StubUnitOfWork::new();
        uow.candidates
            .expect_email_exists()
            .times(1)
            .returning(|_, _| Ok(true));
        uow.candidates.expect_add().never();
        let committed = uow.committed.clone();

        let mut persistence = MockPersistence::new();
        persistence
            .expect_begin()
            .return_once(move || Ok(Box::new(uow) as Box<dyn UnitOfWork>));

        let service = CandidateService::new(Arc::new(persistence));
        let result = service
            .create_candidate(create_request("Ada", "ada@example.com", &[]))
            .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
        assert!(!committed.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_create_commit_failure_propagates() {
        let mut uow = StubUnitOfWork::failing_commit();
        uow.candidates
            .expect_email_exists()
            .returning(|_, _| Ok(false));
        uow.candidates
            .expect_add()
            .times(1)
            .returning(|c| Ok(c.clone().with_id(1)));

        let mut persistence = MockPersistence::new();
        persistence
            .expect_begin()
            .return_once(move || Ok(Box::new(uow) as Box<dyn UnitOfWork>));

        let service = CandidateService::new(Arc::new(persistence));
        let result = service
            .create_candidate(create_request("Ada", "ada@example.com", &[]))
            .await;

        assert!(matches!(result, Err(AppError::Store { .. })));
    }

    #[tokio::test]
    async fn test_validation_happens_before_opening_a_unit() {
        let mut persistence = MockPersistence::new();
        persistence.expect_begin().never();

        let service = CandidateService::new(Arc::new(persistence));
        let result = service
            .create_candidate(create_request("Ada", "not-an-email", &[]))
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_clean_names() {
        let names = vec![
            " Go ".to_string(),
            "".to_string(),
            "Rust".to_string(),
            "Go".to_string(),
        ];
        assert_eq!(clean_names(&names), vec!["Go", "Rust"]);
    }
}
