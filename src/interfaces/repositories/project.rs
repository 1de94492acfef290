use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    entities::project::{Project, ProjectFilter, ProjectInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

const PROJECT_ORDER: &str = " ORDER BY created_at DESC, id DESC";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>, AppError>;
    async fn list_projects_filtered(&self, filter: ProjectFilter) -> Result<Vec<Project>, AppError>;
    async fn get_project_by_id(&self, id: i32) -> Result<Option<Project>, AppError>;
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError>;
    async fn update_project(&self, id: i32, project: &ProjectInsert) -> Result<Option<Project>, AppError>;
    async fn delete_project(&self, id: i32) -> Result<Option<Project>, AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let projects = QueryBuilder::<Postgres>::new("SELECT * FROM projects")
            .push(PROJECT_ORDER)
            .build_query_as::<Project>()
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn list_projects_filtered(&self, filter: ProjectFilter) -> Result<Vec<Project>, AppError> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM projects WHERE ");

        match filter {
            ProjectFilter::Featured => query.push("featured = TRUE"),
            ProjectFilter::Category(category) => query.push("category = ").push_bind(category),
        };
        query.push(PROJECT_ORDER);

        let projects = query
            .build_query_as::<Project>()
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn get_project_by_id(&self, id: i32) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>(
            r#"SELECT * FROM projects WHERE id = $1"#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        let created = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (
                title, description, technologies, github, demo,
                image, category, featured, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.technologies)
        .bind(&project.github)
        .bind(&project.demo)
        .bind(&project.image)
        .bind(&project.category)
        .bind(project.featured)
        .bind(project.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_project(&self, id: i32, project: &ProjectInsert) -> Result<Option<Project>, AppError> {
        let updated = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects SET
                title = $1,
                description = $2,
                technologies = $3,
                github = $4,
                demo = $5,
                image = $6,
                category = $7,
                featured = $8,
                status = $9,
                updated_at = NOW()
            WHERE id = $10
            RETURNING *
            "#
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.technologies)
        .bind(&project.github)
        .bind(&project.demo)
        .bind(&project.image)
        .bind(&project.category)
        .bind(project.featured)
        .bind(project.status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_project(&self, id: i32) -> Result<Option<Project>, AppError> {
        let deleted = sqlx::query_as::<_, Project>(
            r#"DELETE FROM projects WHERE id = $1 RETURNING *"#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }
}
