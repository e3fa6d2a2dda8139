//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{BlogId, WriterId};
use kernel::query::{ListSpec, SortKey};

use crate::domain::entity::{Blog, BlogView, ToggleOutcome};
use crate::error::BlogResult;

/// Sortable blog fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlogSort {
    CreatedAt,
    UpdatedAt,
    Title,
    PublishedAt,
}

impl SortKey for BlogSort {
    const DEFAULT: Self = BlogSort::CreatedAt;

    fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "createdAt" => Some(BlogSort::CreatedAt),
            "updatedAt" => Some(BlogSort::UpdatedAt),
            "title" => Some(BlogSort::Title),
            "publishedAt" => Some(BlogSort::PublishedAt),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            BlogSort::CreatedAt => "b.created_at",
            BlogSort::UpdatedAt => "b.updated_at",
            BlogSort::Title => "b.title",
            BlogSort::PublishedAt => "b.published_at",
        }
    }
}

/// Which writer set a toggle or membership filter refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlogSet {
    Likes,
    Favorites,
}

impl BlogSet {
    pub fn column(self) -> &'static str {
        match self {
            BlogSet::Likes => "likes",
            BlogSet::Favorites => "favorites",
        }
    }
}

/// Blog listing query
///
/// Every filter is tri-state: `None` means "do not filter".
#[derive(Debug, Clone, Default)]
pub struct BlogQuery {
    pub spec: ListSpec<BlogSort>,
    pub writer_id: Option<WriterId>,
    pub is_published: Option<bool>,
    /// Restrict to blogs whose set contains this writer
    pub member_of: Option<(BlogSet, WriterId)>,
}

/// Blog repository trait
#[trait_variant::make(BlogRepository: Send)]
pub trait LocalBlogRepository {
    async fn create(&self, blog: &Blog) -> BlogResult<()>;

    async fn find_by_id(&self, id: BlogId) -> BlogResult<Option<BlogView>>;

    /// One page of blogs with writer summaries, plus the total match count
    async fn list(&self, query: &BlogQuery) -> BlogResult<(Vec<BlogView>, u64)>;

    /// Persist editable fields and publish state
    async fn update(&self, blog: &Blog) -> BlogResult<()>;

    /// `false` when no such blog
    async fn delete(&self, id: BlogId) -> BlogResult<bool>;

    /// Flip `writer_id`'s membership in one set atomically; `None` when no
    /// such blog
    async fn toggle(
        &self,
        id: BlogId,
        set: BlogSet,
        writer_id: WriterId,
    ) -> BlogResult<Option<ToggleOutcome>>;
}
