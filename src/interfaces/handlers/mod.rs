pub mod articles;
pub mod contact;
pub mod experience;
pub mod home;
pub mod portfolio;
pub mod projects;
pub mod system;
