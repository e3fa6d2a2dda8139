//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{Blog, BlogPatch, BlogView, NewBlog, ToggleOutcome};
pub use repository::{BlogQuery, BlogRepository, BlogSet, BlogSort};
