//! Blog Error Types
//!
//! Blog-specific errors that integrate with the unified `kernel::error::AppError`
//! system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx, kind::ErrorKind};
use thiserror::Error;

pub type BlogResult<T> = Result<T, BlogError>;

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Blog not found")]
    BlogNotFound,

    /// Caller is authenticated but does not own the blog
    #[error("Access denied: You can only modify your own resources")]
    NotOwner,

    #[error(transparent)]
    App(#[from] AppError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::BlogNotFound => ErrorKind::NotFound,
            BlogError::NotOwner => ErrorKind::Forbidden,
            BlogError::App(e) => e.kind(),
            BlogError::Database(e) => classify_sqlx(e).0,
            BlogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn into_app_error(self) -> AppError {
        match self {
            BlogError::App(e) => e,
            BlogError::Database(e) => AppError::from(e),
            BlogError::Internal(msg) => AppError::internal(msg),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            BlogError::Database(e) if self.kind().is_server_error() => {
                tracing::error!(error = %e, "Blog database error");
            }
            BlogError::Internal(msg) => {
                tracing::error!(message = %msg, "Blog internal error");
            }
            BlogError::App(e) if e.is_server_error() => {
                tracing::error!(error = %e, "Blog application error");
            }
            BlogError::NotOwner => {
                tracing::warn!("Blog ownership check failed");
            }
            _ => {
                tracing::debug!(error = %self, "Blog error");
            }
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
