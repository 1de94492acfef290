use std::sync::Arc;

use sqlx::PgPool;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod shared_repos;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{db, storage, utils};

use shared_repos::SharedRepositories;
use storage::{pdf_upload::PdfStore, AttachmentStore};
use use_cases::{
    article::ArticleHandler,
    contact::ContactHandler,
    experience::ExperienceHandler,
    portfolio::PortfolioHandler,
    project::ProjectHandler,
};

pub struct AppState {
    pub article_handler: ArticleHandler,
    pub project_handler: ProjectHandler,
    pub experience_handler: ExperienceHandler,
    pub contact_handler: ContactHandler,
    pub portfolio_handler: PortfolioHandler,
    /// Used by the health check only. Absent when repositories are not database backed.
    pub db_pool: Option<PgPool>,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: PgPool) -> Self {
        let repos = SharedRepositories::new(pool.clone());
        let attachments = Arc::new(PdfStore::from_config(config));

        AppState::from_repositories(repos, attachments, Some(pool))
    }

    pub fn from_repositories(
        repos: SharedRepositories,
        attachments: Arc<dyn AttachmentStore>,
        db_pool: Option<PgPool>,
    ) -> Self {
        AppState {
            article_handler: ArticleHandler::new(repos.article_repo, attachments),
            project_handler: ProjectHandler::new(repos.project_repo.clone()),
            experience_handler: ExperienceHandler::new(repos.experience_repo.clone()),
            contact_handler: ContactHandler::new(
                repos.contact_info_repo.clone(),
                repos.contact_message_repo,
            ),
            portfolio_handler: PortfolioHandler::new(
                repos.contact_info_repo,
                repos.project_repo,
                repos.experience_repo,
            ),
            db_pool,
        }
    }
}
