//! PostgreSQL implementation of the candidate repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::HashMap;

use super::pg_persistence::PgUnitOfWork;
use super::rows::{CandidateRow, CandidateSkillRow};
use crate::domain::entities::{Candidate, CandidateSkill};
use crate::domain::repositories::{CandidateFilter, CandidateRepository};
use crate::domain::value_objects::Email;
use crate::error::AppError;

impl PgUnitOfWork {
    /// Loads the associations of `ids` in one query, grouped by candidate.
    async fn load_associations(
        &mut self,
        ids: &[i64],
    ) -> Result<HashMap<i64, Vec<CandidateSkill>>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, CandidateSkillRow>(
            r#"
            SELECT candidate_id, skill_id, added_at
            FROM candidate_skills
            WHERE candidate_id = ANY($1)
            ORDER BY candidate_id, added_at, skill_id
            "#,
        )
        .bind(ids)
        .fetch_all(&mut *self.tx)
        .await?;

        let mut grouped: HashMap<i64, Vec<CandidateSkill>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.candidate_id)
                .or_default()
                .push(row.into());
        }

        Ok(grouped)
    }

    async fn with_associations(
        &mut self,
        rows: Vec<CandidateRow>,
    ) -> Result<Vec<Candidate>, AppError> {
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut associations = self.load_associations(&ids).await?;

        rows.into_iter()
            .map(|row| {
                let skills = associations.remove(&row.id).unwrap_or_default();
                row.into_candidate(skills)
            })
            .collect()
    }

    /// Inserts `candidate`'s associations under `candidate_id`.
    async fn insert_associations(
        &mut self,
        candidate_id: i64,
        skills: &[CandidateSkill],
    ) -> Result<(), AppError> {
        if skills.is_empty() {
            return Ok(());
        }

        let skill_ids: Vec<i64> = skills.iter().map(CandidateSkill::skill_id).collect();
        let added_at: Vec<DateTime<Utc>> = skills.iter().map(CandidateSkill::added_at).collect();

        sqlx::query(
            r#"
            INSERT INTO candidate_skills (candidate_id, skill_id, added_at)
            SELECT $1, skill_id, added_at
            FROM UNNEST($2::BIGINT[], $3::TIMESTAMPTZ[]) AS t(skill_id, added_at)
            "#,
        )
        .bind(candidate_id)
        .bind(&skill_ids)
        .bind(&added_at)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl CandidateRepository for PgUnitOfWork {
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Candidate>, AppError> {
        let row = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT c.id, c.full_name, c.date_of_birth, c.contact_number, c.email,
                   c.created_at, c.updated_at
            FROM candidates c
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        row.map(|r| r.into_candidate(Vec::new())).transpose()
    }

    async fn find_with_skills(&mut self, id: i64) -> Result<Option<Candidate>, AppError> {
        let row = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT c.id, c.full_name, c.date_of_birth, c.contact_number, c.email,
                   c.created_at, c.updated_at
            FROM candidates c
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        match row {
            Some(row) => Ok(self.with_associations(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_with_skills(&mut self) -> Result<Vec<Candidate>, AppError> {
        let rows = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT c.id, c.full_name, c.date_of_birth, c.contact_number, c.email,
                   c.created_at, c.updated_at
            FROM candidates c
            ORDER BY c.id
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await?;

        self.with_associations(rows).await
    }

    async fn search(&mut self, filter: &CandidateFilter) -> Result<Vec<Candidate>, AppError> {
        // $1 NULL disables the name filter, an empty $2 the skill filter
        let rows = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT c.id, c.full_name, c.date_of_birth, c.contact_number, c.email,
                   c.created_at, c.updated_at
            FROM candidates c
            WHERE ($1::TEXT IS NULL OR strpos(c.full_name, $1) > 0)
              AND (
                cardinality($2::TEXT[]) = 0
                OR EXISTS (
                    SELECT 1
                    FROM candidate_skills cs
                    JOIN skills s ON s.id = cs.skill_id
                    WHERE cs.candidate_id = c.id AND s.name = ANY($2)
                )
              )
            ORDER BY c.id
            "#,
        )
        .bind(filter.name_pattern())
        .bind(&filter.skills)
        .fetch_all(&mut *self.tx)
        .await?;

        self.with_associations(rows).await
    }

    async fn email_exists(
        &mut self,
        email: &Email,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM candidates
                WHERE email = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email.as_str())
        .bind(exclude_id)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(exists)
    }

    async fn add(&mut self, candidate: &Candidate) -> Result<Candidate, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO candidates
                (full_name, date_of_birth, contact_number, email, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(candidate.full_name())
        .bind(candidate.date_of_birth())
        .bind(candidate.contact_number())
        .bind(candidate.email().as_str())
        .bind(candidate.created_at())
        .bind(candidate.updated_at())
        .fetch_one(&mut *self.tx)
        .await?;

        self.insert_associations(id, candidate.skills()).await?;

        Ok(candidate.clone().with_id(id))
    }

    async fn update(&mut self, candidate: &Candidate) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE candidates
            SET full_name = $2,
                date_of_birth = $3,
                contact_number = $4,
                email = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(candidate.id())
        .bind(candidate.full_name())
        .bind(candidate.date_of_birth())
        .bind(candidate.contact_number())
        .bind(candidate.email().as_str())
        .bind(candidate.updated_at())
        .execute(&mut *self.tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Candidate not found",
                json!({ "id": candidate.id() }),
            ));
        }

        sqlx::query("DELETE FROM candidate_skills WHERE candidate_id = $1")
            .bind(candidate.id())
            .execute(&mut *self.tx)
            .await?;

        self.insert_associations(candidate.id(), candidate.skills())
            .await
    }

    async fn delete(&mut self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Candidate not found",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }
}
