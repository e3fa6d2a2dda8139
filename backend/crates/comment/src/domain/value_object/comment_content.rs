//! Comment Content Value Object

use kernel::error::app_error::AppResult;
use kernel::validation::length_between;

pub const COMMENT_MAX_LENGTH: usize = 1000;

/// 1 to 1000 characters after trimming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentContent(String);

impl CommentContent {
    pub fn new(raw: &str) -> AppResult<Self> {
        length_between(
            "content",
            raw,
            1,
            COMMENT_MAX_LENGTH,
            "Comment content must be between 1 and 1000 characters",
        )
        .map(Self)
    }

    pub fn from_db(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
