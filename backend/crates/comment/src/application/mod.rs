//! Application Layer
//!
//! Use cases and application services.

pub mod create_comment;
pub mod manage_comment;
pub mod read_comments;

// Re-exports
pub use create_comment::{CreateCommentInput, CreateCommentUseCase};
pub use manage_comment::{ManageCommentUseCase, like_message, moderation_message};
pub use read_comments::ReadCommentsUseCase;
