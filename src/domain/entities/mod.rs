pub mod api_response;
pub mod article;
pub mod contact;
pub mod experience;
pub mod input_fields;
pub mod portfolio;
pub mod project;
