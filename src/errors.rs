use std::fmt;

use actix_multipart::MultipartError;
use actix_web::{
    error::{PayloadError, ResponseError},
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;
use serde::Serialize;
use validator::ValidationErrors;

/// Outward classification of every failure the service can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    StorageFailure,
    Unexpected,
}

/// Storage-level conflicts translated from PostgreSQL error codes.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    #[display("Duplicate entry found")]
    Duplicate,

    #[display("Referenced record not found")]
    ReferencedRecordMissing,

    #[display("Invalid input format")]
    InvalidInputFormat,
}

impl ConflictKind {
    fn from_pg_code(code: &str) -> Option<Self> {
        match code {
            "23505" => Some(ConflictKind::Duplicate),
            "23503" => Some(ConflictKind::ReferencedRecordMissing),
            "22P02" => Some(ConflictKind::InvalidInputFormat),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    BadRequest(String),
    NotFound(String),
    Conflict(ConflictKind),
    StorageFailure(String),
    InternalError(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => ErrorKind::Validation,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::StorageFailure(_) => ErrorKind::StorageFailure,
            AppError::InternalError(_) => ErrorKind::Unexpected,
        }
    }

    /// Message safe to show to clients. Storage and internal details stay in logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(_) => "Validation failed".to_string(),
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Conflict(kind) => kind.to_string(),
            AppError::StorageFailure(_) => "Database operation failed".to_string(),
            AppError::InternalError(_) => "Internal server error".to_string(),
        }
    }

    /// JSON body shared by `error_response` and the error envelope middleware.
    pub fn envelope(&self) -> serde_json::Value {
        match self {
            AppError::ValidationError(errors) => serde_json::json!({
                "success": false,
                "error": self.public_message(),
                "details": errors
            }),
            _ => serde_json::json!({
                "success": false,
                "error": self.public_message()
            }),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(kind) => write!(f, "Conflict: {}", kind),
            AppError::StorageFailure(msg) => write!(f, "Storage failure: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg)
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(self.envelope())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(ConflictKind::Duplicate) => StatusCode::CONFLICT,
            AppError::Conflict(ConflictKind::ReferencedRecordMissing) => StatusCode::NOT_FOUND,
            AppError::Conflict(ConflictKind::InvalidInputFormat) => StatusCode::BAD_REQUEST,
            AppError::StorageFailure(_) | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        // HashMap iteration order is unstable
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ValidationError(field_errors)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if let Some(kind) = db_err.code().as_deref().and_then(ConflictKind::from_pg_code) {
                return AppError::Conflict(kind);
            }
        }
        AppError::StorageFailure(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(format!("IO error: {}", err))
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        match err {
            MultipartError::ContentTypeIncompatible => {
                AppError::BadRequest("Request must be multipart/form-data".to_string())
            }
            MultipartError::Payload(PayloadError::Overflow) => {
                AppError::BadRequest("Upload exceeds the maximum request size".to_string())
            }
            MultipartError::Payload(payload_err) => {
                AppError::BadRequest(format!("Upload could not be read: {}", payload_err))
            }
            _ => AppError::BadRequest(err.to_string()),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(email(message = "Email must be valid"))]
        email: String,
        #[validate(length(min = 1, message = "Name cannot be empty"))]
        name: String,
    }

    #[test]
    fn conflict_kinds_map_to_distinct_statuses() {
        assert_eq!(AppError::Conflict(ConflictKind::Duplicate).status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Conflict(ConflictKind::ReferencedRecordMissing).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict(ConflictKind::InvalidInputFormat).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn pg_codes_translate_to_conflict_kinds() {
        assert_eq!(ConflictKind::from_pg_code("23505"), Some(ConflictKind::Duplicate));
        assert_eq!(ConflictKind::from_pg_code("23503"), Some(ConflictKind::ReferencedRecordMissing));
        assert_eq!(ConflictKind::from_pg_code("22P02"), Some(ConflictKind::InvalidInputFormat));
        assert_eq!(ConflictKind::from_pg_code("40001"), None);
    }

    #[test]
    fn non_database_sqlx_errors_become_storage_failures() {
        let err = AppError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind(), ErrorKind::StorageFailure);
        assert_eq!(err.public_message(), "Database operation failed");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_details_are_not_public() {
        let err = AppError::InternalError("disk on fire".into());
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert_eq!(err.envelope()["error"], "Internal server error");
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn only_overflowing_uploads_are_reported_as_too_large() {
        let overflow = AppError::from(MultipartError::Payload(PayloadError::Overflow));
        assert_eq!(overflow.public_message(), "Upload exceeds the maximum request size");

        let truncated = AppError::from(MultipartError::Payload(PayloadError::EncodingCorrupted));
        let message = truncated.public_message();
        assert!(message.starts_with("Upload could not be read"), "{message}");
        assert!(!message.contains("too large"));
        assert_eq!(truncated.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validation_errors_keep_field_details() {
        let sample = Sample { email: "nope".into(), name: String::new() };
        let err = AppError::from(sample.validate().unwrap_err());

        let body = err.envelope();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["details"][0]["field"], "email");
        assert_eq!(body["details"][0]["message"], "Email must be valid");
        assert_eq!(body["details"][1]["field"], "name");
    }
}
