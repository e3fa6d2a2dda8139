//! Blog Read Use Cases
//!
//! Single blog lookup and every listing flavour (all, by writer, my likes,
//! my favorites). Only the likes/favorites listings are restricted to
//! published blogs; elsewhere `isPublished` filters only when given.

use std::sync::Arc;

use kernel::id::{BlogId, WriterId};
use kernel::query::{ListSpec, Page};

use crate::domain::entity::BlogView;
use crate::domain::repository::{BlogQuery, BlogRepository, BlogSet, BlogSort};
use crate::error::{BlogError, BlogResult};

pub struct ReadBlogsUseCase<B>
where
    B: BlogRepository,
{
    repo: Arc<B>,
}

impl<B> ReadBlogsUseCase<B>
where
    B: BlogRepository,
{
    pub fn new(repo: Arc<B>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, id: BlogId) -> BlogResult<BlogView> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(BlogError::BlogNotFound)
    }

    pub async fn list(&self, query: BlogQuery) -> BlogResult<Page<BlogView>> {
        let (items, total) = self.repo.list(&query).await?;
        Ok(Page::new("blogs", items, total, query.spec.page))
    }

    /// Published blogs whose like or favorite set contains `writer_id`
    pub async fn member_of(
        &self,
        set: BlogSet,
        writer_id: WriterId,
        spec: ListSpec<BlogSort>,
    ) -> BlogResult<Page<BlogView>> {
        self.list(BlogQuery {
            spec,
            is_published: Some(true),
            member_of: Some((set, writer_id)),
            ..Default::default()
        })
        .await
    }
}
