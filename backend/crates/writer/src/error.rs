//! Writer Error Types
//!
//! Writer and authentication error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx, kind::ErrorKind};
use thiserror::Error;

pub type WriterResult<T> = Result<T, WriterError>;

#[derive(Debug, Error)]
pub enum WriterError {
    #[error("Writer with this email already exists")]
    EmailTaken,

    /// Unknown email or wrong password; the two are indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is deactivated")]
    AccountDeactivated,

    #[error("Writer not found")]
    WriterNotFound,

    #[error("Cannot delete writer with existing blogs. Please reassign or delete the blogs first.")]
    HasBlogs,

    #[error("Access denied: You can only modify your own resources")]
    NotSelf,

    #[error("Access token required")]
    TokenMissing,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but its writer is gone or deactivated
    #[error("Invalid or inactive writer")]
    InactiveWriter,

    /// Validation and other kernel-level failures
    #[error(transparent)]
    App(#[from] AppError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WriterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WriterError::EmailTaken | WriterError::HasBlogs => ErrorKind::Conflict,
            WriterError::InvalidCredentials
            | WriterError::TokenMissing
            | WriterError::InactiveWriter => ErrorKind::Unauthorized,
            WriterError::AccountDeactivated
            | WriterError::NotSelf
            | WriterError::TokenInvalid
            | WriterError::TokenExpired => ErrorKind::Forbidden,
            WriterError::WriterNotFound => ErrorKind::NotFound,
            WriterError::App(e) => e.kind(),
            WriterError::Database(e) => classify_sqlx(e).0,
            WriterError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn into_app_error(self) -> AppError {
        match self {
            WriterError::App(e) => e,
            WriterError::Database(e) => AppError::from(e),
            WriterError::Internal(msg) => AppError::internal(msg),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            WriterError::Database(e) if self.kind().is_server_error() => {
                tracing::error!(error = %e, "Writer database error");
            }
            WriterError::Internal(msg) => {
                tracing::error!(message = %msg, "Writer internal error");
            }
            WriterError::App(e) if e.is_server_error() => {
                tracing::error!(error = %e, "Writer application error");
            }
            WriterError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            WriterError::TokenInvalid | WriterError::TokenExpired | WriterError::InactiveWriter => {
                tracing::warn!(error = %self, "Bearer token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Writer error");
            }
        }
    }
}

impl IntoResponse for WriterError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<platform::token::TokenError> for WriterError {
    fn from(err: platform::token::TokenError) -> Self {
        match err {
            platform::token::TokenError::Expired => WriterError::TokenExpired,
            platform::token::TokenError::Invalid => WriterError::TokenInvalid,
            platform::token::TokenError::Signing(msg) => WriterError::Internal(msg),
        }
    }
}
