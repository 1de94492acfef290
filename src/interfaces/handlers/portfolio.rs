use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::api_response::ApiResponse, errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn get_portfolio(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let portfolio = state.portfolio_handler.get_portfolio().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::item(portfolio)))
}
