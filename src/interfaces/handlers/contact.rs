use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        api_response::ApiResponse,
        contact::{ContactInfoPayload, ContactMessagePayload, CONTACT_THANK_YOU},
    },
    errors::AppError,
    AppState,
};

#[instrument(skip(state))]
pub async fn get_contact_info(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let info = state.contact_handler.get_contact_info().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::item(info)))
}

#[instrument(skip(state, data))]
pub async fn update_contact_info(
    state: web::Data<AppState>,
    data: web::Json<ContactInfoPayload>,
) -> Result<impl Responder, AppError> {
    let info = state.contact_handler.update_contact_info(data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::item(info)))
}

#[instrument(skip(state, data))]
pub async fn submit_message(
    state: web::Data<AppState>,
    data: web::Json<ContactMessagePayload>,
) -> Result<impl Responder, AppError> {
    let message = state.contact_handler.submit_message(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::item(message).with_message(CONTACT_THANK_YOU)))
}

#[instrument(skip(state))]
pub async fn list_messages(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let messages = state.contact_handler.list_messages().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::collection(messages)))
}

#[instrument(skip(state))]
pub async fn get_message(
    message_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let message = state.contact_handler.get_message(&message_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::item(message)))
}

#[instrument(skip(state))]
pub async fn delete_message(
    message_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let deleted = state.contact_handler.delete_message(&message_id).await?;
    Ok(HttpResponse::Ok().json(
        ApiResponse::item(deleted).with_message("Message deleted successfully")
    ))
}
