use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{entities::input_fields::present, errors::AppError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Experience {
    pub id: i32,
    pub company: String,
    pub position: String,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ExperienceInsert {
    #[validate(length(max = 150, message = "Company must be at most 150 characters"))]
    pub company: String,
    #[validate(length(max = 150, message = "Position must be at most 150 characters"))]
    pub position: String,
    pub duration: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Order index cannot be negative"))]
    pub order_index: i32,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ExperiencePayload {
    pub company: Option<String>,
    pub position: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub order_index: Option<i32>,
}

impl ExperiencePayload {
    pub fn prepare_for_insert(self) -> Result<ExperienceInsert, AppError> {
        let (Some(company), Some(position)) = (present(self.company), present(self.position)) else {
            return Err(AppError::BadRequest("Company and position are required".to_string()));
        };

        let insert = ExperienceInsert {
            company,
            position,
            duration: present(self.duration),
            description: present(self.description),
            order_index: self.order_index.unwrap_or(0),
        };

        insert.validate()?;
        Ok(insert)
    }
}
