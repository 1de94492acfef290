use std::sync::Arc;

use crate::repositories::{
    article::ArticleRepository,
    contact::{ContactInfoRepository, ContactMessageRepository},
    experience::ExperienceRepository,
    project::ProjectRepository,
    sqlx_repo::{
        SqlxArticleRepo, SqlxContactInfoRepo, SqlxContactMessageRepo, SqlxExperienceRepo,
        SqlxProjectRepo,
    },
};

#[derive(Clone)]
pub struct SharedRepositories {
    pub article_repo: Arc<dyn ArticleRepository>,
    pub project_repo: Arc<dyn ProjectRepository>,
    pub experience_repo: Arc<dyn ExperienceRepository>,
    pub contact_info_repo: Arc<dyn ContactInfoRepository>,
    pub contact_message_repo: Arc<dyn ContactMessageRepository>,
}

impl SharedRepositories {
    pub fn new(pool: sqlx::PgPool) -> Self {
        let article_repo = SqlxArticleRepo::new(pool.clone());
        let project_repo = SqlxProjectRepo::new(pool.clone());
        let experience_repo = SqlxExperienceRepo::new(pool.clone());
        let contact_info_repo = SqlxContactInfoRepo::new(pool.clone());
        let contact_message_repo = SqlxContactMessageRepo::new(pool);

        SharedRepositories {
            article_repo: Arc::new(article_repo),
            project_repo: Arc::new(project_repo),
            experience_repo: Arc::new(experience_repo),
            contact_info_repo: Arc::new(contact_info_repo),
            contact_message_repo: Arc::new(contact_message_repo),
        }
    }
}
