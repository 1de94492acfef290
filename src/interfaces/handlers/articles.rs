use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        api_response::{ApiResponse, LikesResponse},
        article::PdfUpload,
    },
    errors::AppError,
    use_cases::extractors::ArticleBody,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_articles(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let articles = state.article_handler.list_articles().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::collection(articles)))
}

#[instrument(skip(state))]
pub async fn list_featured_articles(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let articles = state.article_handler.list_featured().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::collection(articles)))
}

#[instrument(skip(state))]
pub async fn list_articles_by_category(
    category: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let articles = state.article_handler.list_by_category(&category).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::collection(articles)))
}

#[instrument(skip(state))]
pub async fn list_articles_by_tag(
    tag: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let articles = state.article_handler.list_by_tag(&tag).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::collection(articles)))
}

/// Every read through this route counts as a view.
#[instrument(skip(state))]
pub async fn get_article(
    article_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let article = state.article_handler.read_and_record_view(&article_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::item(article)))
}

#[instrument(skip(state))]
pub async fn like_article(
    article_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let likes = state.article_handler.like_article(&article_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::item(LikesResponse { likes })))
}

#[instrument(skip(state, body))]
pub async fn create_article(
    state: web::Data<AppState>,
    body: ArticleBody,
) -> Result<impl Responder, AppError> {
    let article = state.article_handler
        .create_article(body.payload, body.pdf)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::item(article)))
}

#[instrument(skip(state, body))]
pub async fn update_article(
    article_id: web::Path<String>,
    state: web::Data<AppState>,
    body: ArticleBody,
) -> Result<impl Responder, AppError> {
    let article = state.article_handler
        .update_article(&article_id, body.payload, body.pdf)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::item(article)))
}

#[instrument(skip(state, form))]
pub async fn upload_article_pdf(
    article_id: web::Path<String>,
    state: web::Data<AppState>,
    form: MultipartForm<PdfUpload>,
) -> Result<impl Responder, AppError> {
    let article = state.article_handler
        .upload_pdf(&article_id, form.into_inner().pdf)
        .await?;

    Ok(HttpResponse::Ok().json(
        ApiResponse::item(article).with_message("PDF uploaded successfully")
    ))
}

#[instrument(skip(state))]
pub async fn delete_article(
    article_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let deleted = state.article_handler.delete_article(&article_id).await?;
    Ok(HttpResponse::Ok().json(
        ApiResponse::item(deleted).with_message("Article deleted successfully")
    ))
}
