pub mod article;
pub mod contact;
pub mod experience;
pub mod extractors;
pub mod portfolio;
pub mod project;
