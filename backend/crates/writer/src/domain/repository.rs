//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::WriterId;
use kernel::query::{ListSpec, SortKey};

use crate::domain::entity::{Writer, WriterListing};
use crate::domain::value_object::email::Email;
use crate::error::WriterResult;

/// Sortable writer fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterSort {
    CreatedAt,
    UpdatedAt,
    Name,
    Email,
}

impl SortKey for WriterSort {
    const DEFAULT: Self = WriterSort::CreatedAt;

    fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "createdAt" => Some(WriterSort::CreatedAt),
            "updatedAt" => Some(WriterSort::UpdatedAt),
            "name" => Some(WriterSort::Name),
            "email" => Some(WriterSort::Email),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            WriterSort::CreatedAt => "w.created_at",
            WriterSort::UpdatedAt => "w.updated_at",
            WriterSort::Name => "w.name",
            WriterSort::Email => "w.email",
        }
    }
}

/// Writer listing query: search over name and email, optional active filter
#[derive(Debug, Clone, Default)]
pub struct WriterQuery {
    pub spec: ListSpec<WriterSort>,
    pub is_active: Option<bool>,
}

/// Writer repository trait
#[trait_variant::make(WriterRepository: Send)]
pub trait LocalWriterRepository {
    /// Insert a new writer; a duplicate email is `EmailTaken`
    async fn create(&self, writer: &Writer) -> WriterResult<()>;

    async fn find_by_id(&self, id: WriterId) -> WriterResult<Option<Writer>>;

    async fn find_by_email(&self, email: &Email) -> WriterResult<Option<Writer>>;

    async fn exists_by_email(&self, email: &Email) -> WriterResult<bool>;

    /// One page of writers with blog counts, plus the total match count
    async fn list(&self, query: &WriterQuery) -> WriterResult<(Vec<WriterListing>, u64)>;

    /// Persist profile fields and the active flag
    async fn update(&self, writer: &Writer) -> WriterResult<()>;

    /// Hard delete; `false` when no such writer
    async fn delete(&self, id: WriterId) -> WriterResult<bool>;
}

/// Blog counters needed by writer profiles
#[trait_variant::make(WriterBlogStats: Send)]
pub trait LocalWriterBlogStats {
    /// Blogs owned by `writer_id`, optionally restricted by publish state
    async fn count_blogs(&self, writer_id: WriterId, published: Option<bool>) -> WriterResult<u64>;
}
