use std::sync::Arc;

use crate::{
    constants::PORTFOLIO_FEATURED_PROJECTS,
    entities::{portfolio::Portfolio, project::ProjectFilter},
    errors::AppError,
    repositories::{
        contact::ContactInfoRepository,
        experience::ExperienceRepository,
        project::ProjectRepository,
    },
};

pub struct PortfolioHandler {
    pub info_repo: Arc<dyn ContactInfoRepository>,
    pub project_repo: Arc<dyn ProjectRepository>,
    pub experience_repo: Arc<dyn ExperienceRepository>,
}

impl PortfolioHandler {
    pub fn new(
        info_repo: Arc<dyn ContactInfoRepository>,
        project_repo: Arc<dyn ProjectRepository>,
        experience_repo: Arc<dyn ExperienceRepository>,
    ) -> Self {
        PortfolioHandler { info_repo, project_repo, experience_repo }
    }

    /// Reads the profile, featured projects and experience concurrently.
    /// A failure in any of the three fails the whole read.
    pub async fn get_portfolio(&self) -> Result<Portfolio, AppError> {
        let (info, mut projects, experience) = futures::try_join!(
            self.info_repo.get_contact_info(),
            self.project_repo.list_projects_filtered(ProjectFilter::Featured),
            self.experience_repo.list_experience(),
        )?;

        projects.truncate(PORTFOLIO_FEATURED_PROJECTS);

        Ok(Portfolio::assemble(info, projects, experience))
    }
}
