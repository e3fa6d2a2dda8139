//! Blog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Blog entity, value objects, repository traits
//! - `application/` - Use cases (create, read, manage, toggle)
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Blog CRUD with derived excerpts and a one-time `publishedAt` stamp
//! - Paginated listing with search over title, content and tags
//! - Like and favorite toggles as single-statement array updates
//! - "My likes" and "my favorites" listings
//!
//! Drafts are only ever returned to the writer who owns them.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use error::{BlogError, BlogResult};
pub use infra::postgres::PgBlogRepository;
pub use presentation::router::blog_router;
