use std::sync::Arc;

use crate::{
    entities::project::{Project, ProjectFilter, ProjectPayload},
    errors::AppError,
    repositories::project::ProjectRepository,
    utils::valid_id::valid_id,
};

fn not_found() -> AppError {
    AppError::NotFound("Project not found".to_string())
}

pub struct ProjectHandler {
    pub project_repo: Arc<dyn ProjectRepository>,
}

impl ProjectHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>) -> Self {
        ProjectHandler { project_repo }
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects().await
    }

    pub async fn list_featured(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects_filtered(ProjectFilter::Featured).await
    }

    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Project>, AppError> {
        self.project_repo
            .list_projects_filtered(ProjectFilter::Category(category.to_string()))
            .await
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, AppError> {
        let id = valid_id(id)?;
        self.project_repo
            .get_project_by_id(id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn create_project(&self, payload: ProjectPayload) -> Result<Project, AppError> {
        let insert = payload.prepare_for_insert()?;
        self.project_repo.create_project(&insert).await
    }

    pub async fn update_project(&self, id: &str, payload: ProjectPayload) -> Result<Project, AppError> {
        let id = valid_id(id)?;
        let insert = payload.prepare_for_insert()?;

        self.project_repo
            .update_project(id, &insert)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn delete_project(&self, id: &str) -> Result<Project, AppError> {
        let id = valid_id(id)?;
        self.project_repo
            .delete_project(id)
            .await?
            .ok_or_else(not_found)
    }
}
