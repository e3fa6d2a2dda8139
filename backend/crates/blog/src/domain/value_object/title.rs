//! Blog Title Value Object

use kernel::error::app_error::AppResult;
use kernel::validation::length_between;
use std::fmt;

pub const TITLE_MIN_LENGTH: usize = 5;
pub const TITLE_MAX_LENGTH: usize = 200;

/// 5 to 200 characters after trimming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    pub fn new(raw: &str) -> AppResult<Self> {
        length_between(
            "title",
            raw,
            TITLE_MIN_LENGTH,
            TITLE_MAX_LENGTH,
            "Title must be between 5 and 200 characters",
        )
        .map(Self)
    }

    pub fn from_db(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
