pub mod article;
pub mod contact;
pub mod experience;
pub mod project;
pub mod sqlx_repo;
