//! Writer Profile Use Cases
//!
//! Read-only views: single profile, paginated listing and blog stats.

use std::sync::Arc;

use kernel::id::WriterId;
use kernel::query::Page;

use crate::domain::entity::{BlogStats, Writer, WriterListing};
use crate::domain::repository::{WriterBlogStats, WriterQuery, WriterRepository};
use crate::error::{WriterError, WriterResult};

pub struct WriterProfileUseCase<W>
where
    W: WriterRepository + WriterBlogStats,
{
    repo: Arc<W>,
}

impl<W> WriterProfileUseCase<W>
where
    W: WriterRepository + WriterBlogStats,
{
    pub fn new(repo: Arc<W>) -> Self {
        Self { repo }
    }

    /// Profile without counters (session lookups)
    pub async fn writer(&self, id: WriterId) -> WriterResult<Writer> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(WriterError::WriterNotFound)
    }

    /// Profile with the number of blogs the writer owns
    pub async fn profile(&self, id: WriterId) -> WriterResult<WriterListing> {
        let writer = self.writer(id).await?;
        let blog_count = self.repo.count_blogs(id, None).await?;
        Ok(WriterListing { writer, blog_count })
    }

    pub async fn list(&self, query: WriterQuery) -> WriterResult<Page<WriterListing>> {
        let (items, total) = self.repo.list(&query).await?;
        Ok(Page::new("writers", items, total, query.spec.page))
    }

    pub async fn stats(&self, id: WriterId) -> WriterResult<(WriterListing, BlogStats)> {
        let listing = self.profile(id).await?;
        let published_blogs = self.repo.count_blogs(id, Some(true)).await?;
        let stats = BlogStats {
            total_blogs: listing.blog_count,
            published_blogs,
        };
        Ok((listing, stats))
    }
}
