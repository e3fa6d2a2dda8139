//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::{BlogId, CommentId, WriterId};
use kernel::query::{ListSpec, SortKey};

use crate::domain::entity::{Comment, CommentView, DeleteOutcome, LikeOutcome};
use crate::domain::value_object::comment_content::CommentContent;
use crate::error::CommentResult;

/// Sortable comment fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSort {
    CreatedAt,
    UpdatedAt,
}

impl SortKey for CommentSort {
    const DEFAULT: Self = CommentSort::CreatedAt;

    fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "createdAt" => Some(CommentSort::CreatedAt),
            "updatedAt" => Some(CommentSort::UpdatedAt),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            CommentSort::CreatedAt => "c.created_at",
            CommentSort::UpdatedAt => "c.updated_at",
        }
    }
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    /// Insert `comment` and bump its parent's `reply_count` in one
    /// transaction
    ///
    /// Fails with `BlogNotFound` when the blog is missing and
    /// `ParentNotFound` when the parent is missing or on another blog.
    async fn create(&self, comment: &Comment) -> CommentResult<()>;

    async fn find_by_id(&self, id: CommentId) -> CommentResult<Option<CommentView>>;

    /// Direct replies of every id in `parents`, oldest first
    async fn replies(
        &self,
        parents: &[CommentId],
        approved_only: bool,
    ) -> CommentResult<Vec<CommentView>>;

    /// Approved top-level comments on one blog, plus the total match count
    async fn list_top_level(
        &self,
        blog_id: BlogId,
        spec: &ListSpec<CommentSort>,
    ) -> CommentResult<(Vec<CommentView>, u64)>;

    /// Every comment by one writer regardless of approval
    async fn list_by_author(
        &self,
        author_id: WriterId,
        spec: &ListSpec<CommentSort>,
    ) -> CommentResult<(Vec<CommentView>, u64)>;

    /// Guarded edit; `false` when `id` is not owned by `author_id`
    async fn update_content(
        &self,
        id: CommentId,
        author_id: WriterId,
        content: &CommentContent,
        now: DateTime<Utc>,
    ) -> CommentResult<bool>;

    /// Guarded delete of the comment and its direct replies, decrementing
    /// its parent's counter, all in one transaction
    ///
    /// `None` when `id` is not owned by `author_id`.
    async fn delete(
        &self,
        id: CommentId,
        author_id: WriterId,
    ) -> CommentResult<Option<DeleteOutcome>>;

    /// Flip `writer_id`'s like atomically; `None` when no such comment
    async fn toggle_like(
        &self,
        id: CommentId,
        writer_id: WriterId,
    ) -> CommentResult<Option<LikeOutcome>>;

    /// `false` when no such comment
    async fn set_approved(&self, id: CommentId, approved: bool) -> CommentResult<bool>;
}
