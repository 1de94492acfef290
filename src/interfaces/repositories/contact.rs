use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    entities::contact::{ContactInfo, ContactInfoUpdate, ContactMessage, ContactMessageInsert},
    errors::AppError,
    repositories::sqlx_repo::{SqlxContactInfoRepo, SqlxContactMessageRepo},
};

/// The profile is a single row keyed by this id.
pub const CONTACT_INFO_ID: i32 = 1;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactInfoRepository: Send + Sync {
    async fn get_contact_info(&self) -> Result<Option<ContactInfo>, AppError>;

    /// Overwrites every profile field. Returns `None` when the row was never provisioned.
    async fn update_contact_info(&self, info: &ContactInfoUpdate) -> Result<Option<ContactInfo>, AppError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactMessageRepository: Send + Sync {
    async fn create_message(&self, message: &ContactMessageInsert) -> Result<ContactMessage, AppError>;
    async fn list_messages(&self) -> Result<Vec<ContactMessage>, AppError>;
    async fn get_message_by_id(&self, id: i32) -> Result<Option<ContactMessage>, AppError>;
    async fn delete_message(&self, id: i32) -> Result<Option<ContactMessage>, AppError>;
}

impl SqlxContactInfoRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxContactInfoRepo { pool }
    }
}

impl SqlxContactMessageRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxContactMessageRepo { pool }
    }
}

#[async_trait]
impl ContactInfoRepository for SqlxContactInfoRepo {
    async fn get_contact_info(&self) -> Result<Option<ContactInfo>, AppError> {
        let info = sqlx::query_as::<_, ContactInfo>(
            r#"SELECT * FROM contact_info WHERE id = $1"#
        )
        .bind(CONTACT_INFO_ID)
        .fetch_optional(&self.pool)
        .await?;

        Ok(info)
    }

    async fn update_contact_info(&self, info: &ContactInfoUpdate) -> Result<Option<ContactInfo>, AppError> {
        let updated = sqlx::query_as::<_, ContactInfo>(
            r#"
            UPDATE contact_info SET
                name = $1,
                title = $2,
                bio = $3,
                email = $4,
                phone = $5,
                linkedin = $6,
                github = $7,
                website = $8,
                skills = $9,
                updated_at = NOW()
            WHERE id = $10
            RETURNING *
            "#
        )
        .bind(&info.name)
        .bind(&info.title)
        .bind(&info.bio)
        .bind(&info.email)
        .bind(&info.phone)
        .bind(&info.linkedin)
        .bind(&info.github)
        .bind(&info.website)
        .bind(&info.skills)
        .bind(CONTACT_INFO_ID)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }
}

#[async_trait]
impl ContactMessageRepository for SqlxContactMessageRepo {
    async fn create_message(&self, message: &ContactMessageInsert) -> Result<ContactMessage, AppError> {
        let created = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, message)
            VALUES ($1, $2, $3)
            RETURNING *
            "#
        )
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn list_messages(&self) -> Result<Vec<ContactMessage>, AppError> {
        let messages = sqlx::query_as::<_, ContactMessage>(
            r#"SELECT * FROM contact_messages ORDER BY created_at DESC, id DESC"#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn get_message_by_id(&self, id: i32) -> Result<Option<ContactMessage>, AppError> {
        let message = sqlx::query_as::<_, ContactMessage>(
            r#"SELECT * FROM contact_messages WHERE id = $1"#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }

    async fn delete_message(&self, id: i32) -> Result<Option<ContactMessage>, AppError> {
        let deleted = sqlx::query_as::<_, ContactMessage>(
            r#"DELETE FROM contact_messages WHERE id = $1 RETURNING *"#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }
}
