use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    entities::input_fields::{present, validate_labels, FlagField, ListField},
    errors::AppError,
};

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub pdf_path: Option<String>,
    pub author: String,
    pub read_time: Option<String>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub image: Option<String>,
    pub category: Option<String>,
    pub views: i32,
    pub likes: i32,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable article fields, written as a whole on create and update.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ArticleInsert {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub pdf_path: Option<String>,
    pub author: String,
    pub read_time: Option<String>,
    #[validate(custom(function = "validate_labels"))]
    pub tags: Vec<String>,
    pub featured: bool,
    pub image: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleFilter {
    Featured,
    Category(String),
    Tag(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleCounter {
    Views,
    Likes,
}

impl ArticleCounter {
    pub fn column(&self) -> &'static str {
        match self {
            ArticleCounter::Views => "views",
            ArticleCounter::Likes => "likes",
        }
    }
}

// ───── Input Models ─────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ArticlePayload {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub pdf_path: Option<String>,
    pub author: Option<String>,
    pub read_time: Option<String>,
    pub tags: Option<ListField>,
    pub featured: Option<FlagField>,
    pub image: Option<String>,
    pub category: Option<String>,
}

/// Multipart variant of [`ArticlePayload`] with an optional PDF part.
#[derive(Debug, MultipartForm)]
pub struct ArticleUpload {
    pub title: Option<Text<String>>,
    pub excerpt: Option<Text<String>>,
    pub content: Option<Text<String>>,
    pub pdf_path: Option<Text<String>>,
    pub author: Option<Text<String>>,
    pub read_time: Option<Text<String>>,
    pub tags: Option<Text<String>>,
    pub featured: Option<Text<String>>,
    pub image: Option<Text<String>>,
    pub category: Option<Text<String>>,

    pub pdf: Option<TempFile>,
}

#[derive(Debug, MultipartForm)]
pub struct PdfUpload {
    pub pdf: Option<TempFile>,
}

// ───── Conversions ──────────────────────────────────────────────────

impl ArticleUpload {
    pub fn into_parts(self) -> (ArticlePayload, Option<TempFile>) {
        let text = |field: Option<Text<String>>| field.map(Text::into_inner);

        let payload = ArticlePayload {
            title: text(self.title),
            excerpt: text(self.excerpt),
            content: text(self.content),
            pdf_path: text(self.pdf_path),
            author: text(self.author),
            read_time: text(self.read_time),
            tags: text(self.tags).map(ListField::Serialized),
            featured: text(self.featured).map(FlagField::Text),
            image: text(self.image),
            category: text(self.category),
        };

        (payload, self.pdf)
    }
}

impl ArticlePayload {
    /// Checks mandatory fields and normalizes tags and flags. A blank
    /// `pdf_path` means no attachment.
    pub fn prepare_for_insert(self) -> Result<ArticleInsert, AppError> {
        let (Some(title), Some(excerpt), Some(content), Some(author)) = (
            present(self.title),
            present(self.excerpt),
            present(self.content),
            present(self.author),
        ) else {
            return Err(AppError::BadRequest(
                "Title, excerpt, content, and author are required".to_string(),
            ));
        };

        let insert = ArticleInsert {
            title,
            excerpt,
            content,
            pdf_path: present(self.pdf_path),
            author,
            read_time: present(self.read_time),
            tags: ListField::normalize(self.tags, "tags")?,
            featured: FlagField::normalize(self.featured),
            image: present(self.image),
            category: present(self.category),
        };

        insert.validate()?;
        Ok(insert)
    }
}
