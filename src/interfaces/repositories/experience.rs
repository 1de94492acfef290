use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    entities::experience::{Experience, ExperienceInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxExperienceRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    /// Entries come back by `order_index` ascending, newest first on ties.
    async fn list_experience(&self) -> Result<Vec<Experience>, AppError>;
    async fn get_experience_by_id(&self, id: i32) -> Result<Option<Experience>, AppError>;
    async fn create_experience(&self, entry: &ExperienceInsert) -> Result<Experience, AppError>;
    async fn update_experience(&self, id: i32, entry: &ExperienceInsert) -> Result<Option<Experience>, AppError>;
    async fn delete_experience(&self, id: i32) -> Result<Option<Experience>, AppError>;
}

impl SqlxExperienceRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxExperienceRepo { pool }
    }
}

#[async_trait]
impl ExperienceRepository for SqlxExperienceRepo {
    async fn list_experience(&self) -> Result<Vec<Experience>, AppError> {
        let entries = sqlx::query_as::<_, Experience>(
            r#"
            SELECT * FROM experience
            ORDER BY order_index ASC, created_at DESC, id DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn get_experience_by_id(&self, id: i32) -> Result<Option<Experience>, AppError> {
        let entry = sqlx::query_as::<_, Experience>(
            r#"SELECT * FROM experience WHERE id = $1"#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn create_experience(&self, entry: &ExperienceInsert) -> Result<Experience, AppError> {
        let created = sqlx::query_as::<_, Experience>(
            r#"
            INSERT INTO experience (company, position, duration, description, order_index)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#
        )
        .bind(&entry.company)
        .bind(&entry.position)
        .bind(&entry.duration)
        .bind(&entry.description)
        .bind(entry.order_index)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_experience(&self, id: i32, entry: &ExperienceInsert) -> Result<Option<Experience>, AppError> {
        let updated = sqlx::query_as::<_, Experience>(
            r#"
            UPDATE experience SET
                company = $1,
                position = $2,
                duration = $3,
                description = $4,
                order_index = $5,
                updated_at = NOW()
            WHERE id = $6
            RETURNING *
            "#
        )
        .bind(&entry.company)
        .bind(&entry.position)
        .bind(&entry.duration)
        .bind(&entry.description)
        .bind(entry.order_index)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_experience(&self, id: i32) -> Result<Option<Experience>, AppError> {
        let deleted = sqlx::query_as::<_, Experience>(
            r#"DELETE FROM experience WHERE id = $1 RETURNING *"#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }
}
