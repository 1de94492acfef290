use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Public URL prefix under which stored PDFs are referenced.
pub const PDF_PUBLIC_PREFIX: &str = "/uploads/blogs";
pub const PDF_MAX_BYTES: usize = 10 * 1024 * 1024;

// Portfolio fallbacks when the contact profile is empty
pub const DEFAULT_PORTFOLIO_NAME: &str = "Your Name";
pub const DEFAULT_PORTFOLIO_TITLE: &str = "Full Stack Developer";
pub const DEFAULT_PORTFOLIO_BIO: &str = "Passionate developer";
pub const PORTFOLIO_FEATURED_PROJECTS: usize = 2;
