use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    entities::input_fields::{present, validate_http_url, validate_labels, ListField},
    errors::AppError,
};

pub const CONTACT_THANK_YOU: &str = "Thank you for your message! I'll get back to you soon.";

// ───── Contact Profile ──────────────────────────────────────────────

/// The singleton profile row. Provisioned by the schema migration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContactInfo {
    pub id: i32,
    pub name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ContactInfoUpdate {
    pub name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(custom(function = "validate_http_url"))]
    pub linkedin: Option<String>,
    #[validate(custom(function = "validate_http_url"))]
    pub github: Option<String>,
    #[validate(custom(function = "validate_http_url"))]
    pub website: Option<String>,
    #[validate(custom(function = "validate_labels"))]
    pub skills: Vec<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ContactInfoPayload {
    pub name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub skills: Option<ListField>,
}

impl ContactInfoPayload {
    pub fn prepare_for_update(self) -> Result<ContactInfoUpdate, AppError> {
        let update = ContactInfoUpdate {
            name: present(self.name),
            title: present(self.title),
            bio: present(self.bio),
            email: present(self.email),
            phone: present(self.phone),
            linkedin: present(self.linkedin),
            github: present(self.github),
            website: present(self.website),
            skills: ListField::normalize(self.skills, "skills")?,
        };

        update.validate()?;
        Ok(update)
    }
}

// ───── Contact Messages ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ContactMessageInsert {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: String,

    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    #[validate(length(max = 5000, message = "Message must be at most 5000 characters"))]
    pub message: String,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ContactMessagePayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ContactMessagePayload {
    pub fn prepare_for_insert(self) -> Result<ContactMessageInsert, AppError> {
        let (Some(name), Some(email), Some(message)) =
            (present(self.name), present(self.email), present(self.message))
        else {
            return Err(AppError::BadRequest("Name, email, and message are required".to_string()));
        };

        let insert = ContactMessageInsert {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            message,
        };

        insert.validate()?;
        Ok(insert)
    }
}
