//! Blog Content and Excerpt
//!
//! The excerpt is either supplied by the writer or derived from the content
//! before the blog is stored.

use kernel::error::app_error::{AppError, AppResult};

pub const CONTENT_MIN_LENGTH: usize = 50;
pub const EXCERPT_MAX_LENGTH: usize = 300;

/// Characters of content kept in a derived excerpt
pub const DERIVED_EXCERPT_LENGTH: usize = 150;

/// Blog body, at least 50 characters after trimming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content(String);

impl Content {
    pub fn new(raw: &str) -> AppResult<Self> {
        let content = raw.trim();
        if content.chars().count() < CONTENT_MIN_LENGTH {
            return Err(AppError::invalid_field(
                "content",
                "Content must be at least 50 characters",
                raw,
            ));
        }
        Ok(Self(content.to_string()))
    }

    pub fn from_db(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt(String);

impl Excerpt {
    /// Writer-supplied excerpt; `None` when blank so the caller derives one
    pub fn provided(raw: &str) -> AppResult<Option<Self>> {
        let excerpt = raw.trim();
        if excerpt.chars().count() > EXCERPT_MAX_LENGTH {
            return Err(AppError::invalid_field(
                "excerpt",
                "Excerpt cannot exceed 300 characters",
                raw,
            ));
        }
        Ok((!excerpt.is_empty()).then(|| Self(excerpt.to_string())))
    }

    /// First 150 characters of the content followed by `...`
    pub fn derive(content: &Content) -> Self {
        let head: String = content
            .as_str()
            .chars()
            .take(DERIVED_EXCERPT_LENGTH)
            .collect();
        Self(format!("{}...", head))
    }

    pub fn from_db(excerpt: impl Into<String>) -> Self {
        Self(excerpt.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
