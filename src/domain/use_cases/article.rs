use std::sync::Arc;

use actix_multipart::form::tempfile::TempFile;
use tracing::{info, warn};

use crate::{
    entities::article::{Article, ArticleCounter, ArticleFilter, ArticlePayload},
    errors::AppError,
    repositories::article::ArticleRepository,
    storage::AttachmentStore,
    utils::valid_id::valid_id,
};

const ARTICLE_NOT_FOUND: &str = "Article not found";

fn not_found() -> AppError {
    AppError::NotFound(ARTICLE_NOT_FOUND.to_string())
}

pub struct ArticleHandler {
    pub article_repo: Arc<dyn ArticleRepository>,
    pub attachments: Arc<dyn AttachmentStore>,
}

impl ArticleHandler {
    pub fn new(article_repo: Arc<dyn ArticleRepository>, attachments: Arc<dyn AttachmentStore>) -> Self {
        ArticleHandler { article_repo, attachments }
    }

    pub async fn list_articles(&self) -> Result<Vec<Article>, AppError> {
        self.article_repo.list_articles().await
    }

    pub async fn list_featured(&self) -> Result<Vec<Article>, AppError> {
        self.article_repo.list_articles_filtered(ArticleFilter::Featured).await
    }

    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Article>, AppError> {
        self.article_repo
            .list_articles_filtered(ArticleFilter::Category(category.to_string()))
            .await
    }

    pub async fn list_by_tag(&self, tag: &str) -> Result<Vec<Article>, AppError> {
        self.article_repo
            .list_articles_filtered(ArticleFilter::Tag(tag.to_string()))
            .await
    }

    /// Fetches an article without touching its counters.
    pub async fn get_article(&self, id: &str) -> Result<Article, AppError> {
        let id = valid_id(id)?;
        self.article_repo
            .get_article_by_id(id)
            .await?
            .ok_or_else(not_found)
    }

    /// Fetches an article, then records one view. The returned article
    /// carries the incremented view count.
    pub async fn read_and_record_view(&self, id: &str) -> Result<Article, AppError> {
        let id = valid_id(id)?;
        let mut article = self.article_repo
            .get_article_by_id(id)
            .await?
            .ok_or_else(not_found)?;

        // The row can vanish between the two statements.
        article.views = self.article_repo
            .increment_article_counter(id, ArticleCounter::Views)
            .await?
            .ok_or_else(not_found)?;

        Ok(article)
    }

    pub async fn like_article(&self, id: &str) -> Result<i32, AppError> {
        let id = valid_id(id)?;
        self.article_repo
            .increment_article_counter(id, ArticleCounter::Likes)
            .await?
            .ok_or_else(not_found)
    }

    /// Validates the payload before the attachment is stored, so a rejected
    /// request never leaves a file behind. New articles only reference files
    /// uploaded with them.
    pub async fn create_article(&self, payload: ArticlePayload, pdf: Option<TempFile>) -> Result<Article, AppError> {
        let mut insert = payload.prepare_for_insert()?;

        let stored = self.store(pdf).await?;
        insert.pdf_path = stored.clone();

        let result = self.article_repo.create_article(&insert).await.map(Some);
        let article = self.keep_or_discard(stored.as_deref(), result).await?;
        info!(article_id = article.id, "Article created");
        Ok(article)
    }

    /// Full replace. `pdf_path` comes from the body, and an uploaded file
    /// takes precedence over it.
    pub async fn update_article(&self, id: &str, payload: ArticlePayload, pdf: Option<TempFile>) -> Result<Article, AppError> {
        let id = valid_id(id)?;
        let mut insert = payload.prepare_for_insert()?;

        let stored = self.store(pdf).await?;
        if stored.is_some() {
            insert.pdf_path = stored.clone();
        }

        let result = self.article_repo.update_article(id, &insert).await;
        self.keep_or_discard(stored.as_deref(), result).await
    }

    pub async fn upload_pdf(&self, id: &str, pdf: Option<TempFile>) -> Result<Article, AppError> {
        let id = valid_id(id)?;
        let file = pdf.ok_or_else(|| AppError::BadRequest("No PDF file provided".to_string()))?;

        let pdf_path = self.attachments.store_pdf(file).await?;

        let result = self.article_repo.update_article_pdf_path(id, &pdf_path).await;
        self.keep_or_discard(Some(&pdf_path), result).await
    }

    async fn store(&self, pdf: Option<TempFile>) -> Result<Option<String>, AppError> {
        match pdf {
            Some(file) => Ok(Some(self.attachments.store_pdf(file).await?)),
            None => Ok(None),
        }
    }

    /// Returns the written row, or removes the freshly stored file when the
    /// write failed or hit no row.
    async fn keep_or_discard(
        &self,
        stored: Option<&str>,
        result: Result<Option<Article>, AppError>,
    ) -> Result<Article, AppError> {
        if let Ok(Some(article)) = result {
            return Ok(article);
        }

        if let Some(reference) = stored {
            if let Err(e) = self.attachments.discard_pdf(reference).await {
                warn!(%reference, error = %e, "Failed to discard orphaned attachment");
            }
        }

        result?.ok_or_else(not_found)
    }

    pub async fn delete_article(&self, id: &str) -> Result<Article, AppError> {
        let id = valid_id(id)?;
        let deleted = self.article_repo
            .delete_article(id)
            .await?
            .ok_or_else(not_found)?;

        info!(article_id = deleted.id, "Article deleted");
        Ok(deleted)
    }
}
