//! Comment Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Comment entity, content value object, repository traits
//! - `application/` - Use cases (create, read, manage)
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Threading
//! A reply points at its parent, which keeps a denormalized `reply_count`.
//! Creating a reply and bumping the counter happen in one transaction, as
//! do deleting a comment with its direct replies and decrementing its own
//! parent. Deletes cascade one level only.
//!
//! Edit and delete are guarded by author in the same statement, and a
//! failed guard is reported exactly like a missing comment.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use error::{CommentError, CommentResult};
pub use infra::postgres::PgCommentRepository;
pub use presentation::router::comment_router;
