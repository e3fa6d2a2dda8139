//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{Comment, CommentThread, CommentView, DeleteOutcome, LikeOutcome};
pub use repository::{CommentRepository, CommentSort};
