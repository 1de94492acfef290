use actix_multipart::form::MultipartFormConfig;
use actix_web::{error::JsonPayloadError, web};

use crate::errors::AppError;

const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Routes body decoding failures through `AppError` so they share the error envelope.
/// Multipart bodies may exceed the attachment cap by the room text fields need;
/// the cap itself is enforced when the attachment is stored.
pub fn config_routes(cfg: &mut web::ServiceConfig, max_upload_bytes: usize) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::from(JsonError(err)).into()
    }));

    cfg.app_data(
        MultipartFormConfig::default()
            .total_limit(max_upload_bytes.saturating_add(FORM_OVERHEAD_BYTES))
            .error_handler(|err, _req| AppError::from(err).into()),
    );
}

struct JsonError(JsonPayloadError);

impl From<JsonError> for AppError {
    fn from(JsonError(err): JsonError) -> Self {
        match err {
            JsonPayloadError::ContentType => {
                AppError::BadRequest("Content type must be application/json".to_string())
            }
            JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                AppError::BadRequest("Request body is too large".to_string())
            }
            other => AppError::BadRequest(format!("Invalid JSON payload: {}", other)),
        }
    }
}
