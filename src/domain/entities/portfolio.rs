use serde::{Deserialize, Serialize};

use crate::{
    constants::{DEFAULT_PORTFOLIO_BIO, DEFAULT_PORTFOLIO_NAME, DEFAULT_PORTFOLIO_TITLE},
    entities::{contact::ContactInfo, experience::Experience, project::Project},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioContact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub contact: PortfolioContact,
    pub experience: Vec<Experience>,
}

impl Portfolio {
    /// Builds the aggregate, falling back to fixed literals for missing profile fields.
    pub fn assemble(info: Option<ContactInfo>, projects: Vec<Project>, experience: Vec<Experience>) -> Self {
        let field = |pick: fn(&ContactInfo) -> &Option<String>| {
            info.as_ref().and_then(|profile| pick(profile).clone())
        };
        let or_default = |value: Option<String>, fallback: &str| {
            value.filter(|v| !v.is_empty()).unwrap_or_else(|| fallback.to_string())
        };

        Portfolio {
            name: or_default(field(|p| &p.name), DEFAULT_PORTFOLIO_NAME),
            title: or_default(field(|p| &p.title), DEFAULT_PORTFOLIO_TITLE),
            bio: or_default(field(|p| &p.bio), DEFAULT_PORTFOLIO_BIO),
            skills: info.as_ref().map(|p| p.skills.clone()).unwrap_or_default(),
            projects,
            contact: PortfolioContact {
                email: field(|p| &p.email),
                phone: field(|p| &p.phone),
                linkedin: field(|p| &p.linkedin),
                github: field(|p| &p.github),
                website: field(|p| &p.website),
            },
            experience,
        }
    }
}
