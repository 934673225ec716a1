//! PostgreSQL implementation of the skill repository.

use async_trait::async_trait;
use serde_json::json;

use super::pg_persistence::PgUnitOfWork;
use super::rows::SkillRow;
use crate::domain::entities::Skill;
use crate::domain::repositories::SkillRepository;
use crate::error::AppError;

#[async_trait]
impl SkillRepository for PgUnitOfWork {
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Skill>, AppError> {
        let row = sqlx::query_as::<_, SkillRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM skills
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(Skill::from))
    }

    async fn find_by_name(&mut self, name: &str) -> Result<Option<Skill>, AppError> {
        let row = sqlx::query_as::<_, SkillRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM skills
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(Skill::from))
    }

    async fn find_by_names(&mut self, names: &[String]) -> Result<Vec<Skill>, AppError> {
        let rows = sqlx::query_as::<_, SkillRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM skills
            WHERE name = ANY($1)
            ORDER BY name
            "#,
        )
        .bind(names)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(rows.into_iter().map(Skill::from).collect())
    }

    async fn find_by_ids(&mut self, ids: &[i64]) -> Result<Vec<Skill>, AppError> {
        let rows = sqlx::query_as::<_, SkillRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM skills
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(rows.into_iter().map(Skill::from).collect())
    }

    async fn list(&mut self) -> Result<Vec<Skill>, AppError> {
        let rows = sqlx::query_as::<_, SkillRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM skills
            ORDER BY name
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(rows.into_iter().map(Skill::from).collect())
    }

    async fn exists_by_name(&mut self, name: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM skills WHERE name = $1)")
                .bind(name)
                .fetch_one(&mut *self.tx)
                .await?;

        Ok(exists)
    }

    async fn add(&mut self, skill: &Skill) -> Result<Skill, AppError> {
        let row = sqlx::query_as::<_, SkillRow>(
            r#"
            INSERT INTO skills (name, created_at, updated_at)
            VALUES ($1, $2, $3)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(skill.name())
        .bind(skill.created_at())
        .bind(skill.updated_at())
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(row.into())
    }

    async fn update(&mut self, skill: &Skill) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE skills
            SET name = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(skill.id())
        .bind(skill.name())
        .bind(skill.updated_at())
        .execute(&mut *self.tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Skill not found",
                json!({ "id": skill.id() }),
            ));
        }

        Ok(())
    }

    async fn delete(&mut self, id: i64) -> Result<(), AppError> {
        // candidate_skills rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Skill not found", json!({ "id": id })));
        }

        Ok(())
    }
}
