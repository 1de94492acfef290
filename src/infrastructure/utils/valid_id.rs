use crate::errors::{AppError, ConflictKind};

/// Parses a path identifier. Non-integer input is reported the same way the
/// database reports a malformed value.
pub fn valid_id(id: &str) -> Result<i32, AppError> {
    id.trim()
        .parse::<i32>()
        .map_err(|_| AppError::Conflict(ConflictKind::InvalidInputFormat))
}
