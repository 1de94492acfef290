use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::ValidationError;

use crate::errors::AppError;

const MAX_LABELS: usize = 20;
const MAX_LABEL_LENGTH: usize = 50;

/// A list of labels as clients send it: a JSON array, or a string holding a
/// serialized JSON array (multipart forms can only carry strings).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ListField {
    Items(Vec<String>),
    Serialized(String),
}

impl ListField {
    /// Absent and empty-string inputs normalize to an empty list.
    pub fn normalize(field: Option<ListField>, name: &str) -> Result<Vec<String>, AppError> {
        match field {
            None => Ok(Vec::new()),
            Some(ListField::Items(items)) => Ok(items),
            Some(ListField::Serialized(raw)) if raw.trim().is_empty() => Ok(Vec::new()),
            Some(ListField::Serialized(raw)) => serde_json::from_str::<Vec<String>>(&raw)
                .map_err(|_| AppError::BadRequest(format!("Invalid list format for {}", name))),
        }
    }
}

/// A boolean flag sent either natively or as the literal strings "true"/"false".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FlagField {
    Bool(bool),
    Text(String),
}

impl FlagField {
    /// Only `true` and `"true"` count as set.
    pub fn normalize(field: Option<FlagField>) -> bool {
        match field {
            Some(FlagField::Bool(value)) => value,
            Some(FlagField::Text(text)) => text.trim() == "true",
            None => false,
        }
    }
}

/// Returns the value when it holds something other than whitespace.
/// Used both for mandatory-field checks and to store empty optionals as NULL.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_labels(labels: &[String]) -> Result<(), ValidationError> {
    if labels.len() > MAX_LABELS {
        return Err(new_validation_error("too_many_labels", "Too many entries provided"));
    }
    for label in labels {
        if label.trim().is_empty() || label.chars().count() > MAX_LABEL_LENGTH {
            return Err(new_validation_error("invalid_label_length", "Each entry must be between 1 and 50 characters"));
        }
    }
    Ok(())
}

pub fn validate_http_url(link: &str) -> Result<(), ValidationError> {
    match url::Url::parse(link) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://"))
            }
        }
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

pub fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Body {
        tags: Option<ListField>,
        featured: Option<FlagField>,
    }

    #[test]
    fn native_and_serialized_lists_normalize_identically() {
        let native: Body = serde_json::from_value(json!({ "tags": ["a", "b"] })).unwrap();
        let serialized: Body = serde_json::from_value(json!({ "tags": "[\"a\",\"b\"]" })).unwrap();

        let native = ListField::normalize(native.tags, "tags").unwrap();
        let serialized = ListField::normalize(serialized.tags, "tags").unwrap();

        assert_eq!(native, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(native, serialized);
    }

    #[test]
    fn missing_or_blank_lists_are_empty() {
        assert!(ListField::normalize(None, "tags").unwrap().is_empty());
        assert!(ListField::normalize(Some(ListField::Serialized("  ".into())), "tags").unwrap().is_empty());
    }

    #[test]
    fn malformed_serialized_list_is_a_bad_request() {
        let err = ListField::normalize(Some(ListField::Serialized("[\"a\",".into())), "technologies").unwrap_err();
        match err {
            AppError::BadRequest(msg) => assert_eq!(msg, "Invalid list format for technologies"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn string_flags_match_native_booleans() {
        let as_text: Body = serde_json::from_value(json!({ "featured": "true" })).unwrap();
        let as_bool: Body = serde_json::from_value(json!({ "featured": true })).unwrap();
        assert_eq!(FlagField::normalize(as_text.featured), FlagField::normalize(as_bool.featured));

        let as_text: Body = serde_json::from_value(json!({ "featured": "false" })).unwrap();
        let as_bool: Body = serde_json::from_value(json!({ "featured": false })).unwrap();
        assert_eq!(FlagField::normalize(as_text.featured), FlagField::normalize(as_bool.featured));

        assert!(!FlagField::normalize(Some(FlagField::Text("yes".into()))));
        assert!(!FlagField::normalize(None));
    }

    #[test]
    fn label_rules() {
        assert!(validate_labels(&["rust".into(), "actix".into()]).is_ok());
        assert!(validate_labels(&["".into()]).is_err());
        assert!(validate_labels(&vec!["x".to_string(); MAX_LABELS + 1]).is_err());
    }

    #[test]
    fn only_http_links_are_accepted() {
        assert!(validate_http_url("https://github.com/me/repo").is_ok());
        assert!(validate_http_url("ftp://example.com").is_err());
        assert!(validate_http_url("not a url").is_err());
    }
}
