//! Application Layer
//!
//! Use cases and application services.

pub mod create_blog;
pub mod manage_blog;
pub mod read_blogs;
pub mod toggle_blog;

// Re-exports
pub use create_blog::{CreateBlogInput, CreateBlogUseCase};
pub use manage_blog::{ManageBlogUseCase, UpdateBlogInput};
pub use read_blogs::ReadBlogsUseCase;
pub use toggle_blog::{ToggleBlogUseCase, toggle_message};
