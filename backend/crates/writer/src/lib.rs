//! Writer Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Writer entity, value objects, repository traits
//! - `application/` - Use cases (signup, login, profile, self-service)
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, routers, auth guards
//!
//! ## Features
//! - Writer signup/login with email + password
//! - Stateless HS256 bearer tokens (7 days) with refresh
//! - Paginated writer listing with search and blog counts
//! - Self-only profile update, deactivation and delete
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Unknown email and wrong password produce the same 401
//! - Signup and login sit behind a strict per-IP rate limit
//!
//! The auth guards in [`presentation::middleware`] are reused by the blog
//! and comment routers.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{WriterError, WriterResult};
pub use infra::postgres::PgWriterRepository;
pub use presentation::middleware::{
    AuthGuardState, CurrentWriter, Viewer, optional_auth, require_auth,
};
pub use presentation::router::{auth_router, writer_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
