use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{api_response::ApiResponse, experience::ExperiencePayload},
    errors::AppError,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_experience(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let entries = state.experience_handler.list_experience().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::collection(entries)))
}

#[instrument(skip(state))]
pub async fn get_experience(
    entry_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let entry = state.experience_handler.get_experience(&entry_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::item(entry)))
}

#[instrument(skip(state, data))]
pub async fn create_experience(
    state: web::Data<AppState>,
    data: web::Json<ExperiencePayload>,
) -> Result<impl Responder, AppError> {
    let entry = state.experience_handler.create_experience(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::item(entry)))
}

#[instrument(skip(state, data))]
pub async fn update_experience(
    entry_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<ExperiencePayload>,
) -> Result<impl Responder, AppError> {
    let entry = state.experience_handler
        .update_experience(&entry_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::item(entry)))
}

#[instrument(skip(state))]
pub async fn delete_experience(
    entry_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let deleted = state.experience_handler.delete_experience(&entry_id).await?;
    Ok(HttpResponse::Ok().json(
        ApiResponse::item(deleted).with_message("Experience entry deleted successfully")
    ))
}
