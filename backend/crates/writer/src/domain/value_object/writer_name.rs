//! Writer Name Value Object
//!
//! Display name shown on profiles, blogs and comments.
//!
//! ## Invariants
//! - 2 to 100 characters after trimming
//! - ASCII letters and whitespace only

use kernel::error::app_error::{AppError, AppResult};
use std::fmt;

pub const WRITER_NAME_MIN_LENGTH: usize = 2;

pub const WRITER_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterName(String);

impl WriterName {
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();
        let name = raw.trim();
        let len = name.chars().count();

        if !(WRITER_NAME_MIN_LENGTH..=WRITER_NAME_MAX_LENGTH).contains(&len) {
            return Err(AppError::invalid_field(
                "name",
                "Name must be between 2 and 100 characters",
                raw,
            ));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        {
            return Err(AppError::invalid_field(
                "name",
                "Name can only contain letters and spaces",
                raw,
            ));
        }

        Ok(Self(name.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WriterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
