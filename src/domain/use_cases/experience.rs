use std::sync::Arc;

use crate::{
    entities::experience::{Experience, ExperiencePayload},
    errors::AppError,
    repositories::experience::ExperienceRepository,
    utils::valid_id::valid_id,
};

fn not_found() -> AppError {
    AppError::NotFound("Experience entry not found".to_string())
}

pub struct ExperienceHandler {
    pub experience_repo: Arc<dyn ExperienceRepository>,
}

impl ExperienceHandler {
    pub fn new(experience_repo: Arc<dyn ExperienceRepository>) -> Self {
        ExperienceHandler { experience_repo }
    }

    pub async fn list_experience(&self) -> Result<Vec<Experience>, AppError> {
        self.experience_repo.list_experience().await
    }

    pub async fn get_experience(&self, id: &str) -> Result<Experience, AppError> {
        let id = valid_id(id)?;
        self.experience_repo
            .get_experience_by_id(id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn create_experience(&self, payload: ExperiencePayload) -> Result<Experience, AppError> {
        let insert = payload.prepare_for_insert()?;
        self.experience_repo.create_experience(&insert).await
    }

    pub async fn update_experience(&self, id: &str, payload: ExperiencePayload) -> Result<Experience, AppError> {
        let id = valid_id(id)?;
        let insert = payload.prepare_for_insert()?;

        self.experience_repo
            .update_experience(id, &insert)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn delete_experience(&self, id: &str) -> Result<Experience, AppError> {
        let id = valid_id(id)?;
        self.experience_repo
            .delete_experience(id)
            .await?
            .ok_or_else(not_found)
    }
}
