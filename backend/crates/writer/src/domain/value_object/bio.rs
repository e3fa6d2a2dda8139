//! Bio Value Object

use kernel::error::app_error::{AppError, AppResult};

pub const BIO_MAX_LENGTH: usize = 500;

/// Free-text profile blurb, at most 500 characters after trimming
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bio(String);

impl Bio {
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();
        let bio = raw.trim();
        if bio.chars().count() > BIO_MAX_LENGTH {
            return Err(AppError::invalid_field(
                "bio",
                "Bio cannot exceed 500 characters",
                raw,
            ));
        }
        Ok(Self(bio.to_string()))
    }

    pub fn from_db(bio: impl Into<String>) -> Self {
        Self(bio.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
