//! Comment Error Types
//!
//! Comment-specific errors that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx, kind::ErrorKind};
use thiserror::Error;

pub type CommentResult<T> = Result<T, CommentError>;

#[derive(Debug, Error)]
pub enum CommentError {
    #[error("Comment not found")]
    CommentNotFound,

    #[error("Blog not found")]
    BlogNotFound,

    /// Parent missing or attached to a different blog
    #[error("Parent comment not found")]
    ParentNotFound,

    /// Edit or delete by someone other than the author; indistinguishable
    /// from a missing comment
    #[error("Comment not found or you don't have permission to modify it")]
    NotFoundOrForbidden,

    #[error(transparent)]
    App(#[from] AppError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CommentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommentError::CommentNotFound
            | CommentError::BlogNotFound
            | CommentError::ParentNotFound
            | CommentError::NotFoundOrForbidden => ErrorKind::NotFound,
            CommentError::App(e) => e.kind(),
            CommentError::Database(e) => classify_sqlx(e).0,
            CommentError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn into_app_error(self) -> AppError {
        match self {
            CommentError::App(e) => e,
            CommentError::Database(e) => AppError::from(e),
            CommentError::Internal(msg) => AppError::internal(msg),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            CommentError::Database(e) if self.kind().is_server_error() => {
                tracing::error!(error = %e, "Comment database error");
            }
            CommentError::Internal(msg) => {
                tracing::error!(message = %msg, "Comment internal error");
            }
            CommentError::App(e) if e.is_server_error() => {
                tracing::error!(error = %e, "Comment application error");
            }
            _ => {
                tracing::debug!(error = %self, "Comment error");
            }
        }
    }
}

impl IntoResponse for CommentError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
