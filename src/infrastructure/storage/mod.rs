use actix_multipart::form::tempfile::TempFile;
use async_trait::async_trait;

use crate::errors::AppError;

pub mod pdf_upload;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Persists an uploaded attachment and returns its public reference path.
    async fn store_pdf(&self, file: TempFile) -> Result<String, AppError>;

    /// Removes a file previously returned by `store_pdf`. References this
    /// store did not issue are left alone.
    async fn discard_pdf(&self, reference: &str) -> Result<(), AppError>;
}
