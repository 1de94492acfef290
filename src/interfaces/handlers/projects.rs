use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{api_response::ApiResponse, project::ProjectPayload},
    errors::AppError,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_projects(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list_projects().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::collection(projects)))
}

#[instrument(skip(state))]
pub async fn list_featured_projects(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list_featured().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::collection(projects)))
}

#[instrument(skip(state))]
pub async fn list_projects_by_category(
    category: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list_by_category(&category).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::collection(projects)))
}

#[instrument(skip(state))]
pub async fn get_project(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.get_project(&project_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::item(project)))
}

#[instrument(skip(state, data))]
pub async fn create_project(
    state: web::Data<AppState>,
    data: web::Json<ProjectPayload>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.create_project(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::item(project)))
}

#[instrument(skip(state, data))]
pub async fn update_project(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<ProjectPayload>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler
        .update_project(&project_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::item(project)))
}

#[instrument(skip(state))]
pub async fn delete_project(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let deleted = state.project_handler.delete_project(&project_id).await?;
    Ok(HttpResponse::Ok().json(
        ApiResponse::item(deleted).with_message("Project deleted successfully")
    ))
}
