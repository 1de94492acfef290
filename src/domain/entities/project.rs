use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    entities::input_fields::{present, validate_http_url, validate_labels, FlagField, ListField},
    errors::AppError,
};

#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    #[display("Completed")]
    Completed,

    #[serde(rename = "In Progress")]
    #[display("In Progress")]
    InProgress,

    #[display("Planning")]
    Planning,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Completed => "Completed",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Planning => "Planning",
        }
    }
}

#[derive(Debug, Display)]
#[display("Unknown project status: {_0}")]
pub struct UnknownProjectStatus(String);

impl std::error::Error for UnknownProjectStatus {}

impl TryFrom<String> for ProjectStatus {
    type Error = UnknownProjectStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Completed" => Ok(ProjectStatus::Completed),
            "In Progress" => Ok(ProjectStatus::InProgress),
            "Planning" => Ok(ProjectStatus::Planning),
            _ => Err(UnknownProjectStatus(value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub github: Option<String>,
    pub demo: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub featured: bool,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ProjectInsert {
    pub title: String,
    pub description: String,
    #[validate(custom(function = "validate_labels"))]
    pub technologies: Vec<String>,
    #[validate(custom(function = "validate_http_url"))]
    pub github: Option<String>,
    #[validate(custom(function = "validate_http_url"))]
    pub demo: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub featured: bool,
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectFilter {
    Featured,
    Category(String),
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProjectPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub technologies: Option<ListField>,
    pub github: Option<String>,
    pub demo: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub featured: Option<FlagField>,
    pub status: Option<ProjectStatus>,
}

impl ProjectPayload {
    pub fn prepare_for_insert(self) -> Result<ProjectInsert, AppError> {
        let (Some(title), Some(description)) = (present(self.title), present(self.description)) else {
            return Err(AppError::BadRequest("Title and description are required".to_string()));
        };

        let insert = ProjectInsert {
            title,
            description,
            technologies: ListField::normalize(self.technologies, "technologies")?,
            github: present(self.github),
            demo: present(self.demo),
            image: present(self.image),
            category: present(self.category),
            featured: FlagField::normalize(self.featured),
            status: self.status.unwrap_or_default(),
        };

        insert.validate()?;
        Ok(insert)
    }
}
