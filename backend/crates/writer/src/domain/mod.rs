//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{BlogStats, SocialLinks, Writer, WriterListing, WriterPatch};
pub use repository::{WriterBlogStats, WriterQuery, WriterRepository, WriterSort};
