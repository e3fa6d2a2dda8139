//! Toggle Like / Favorite Use Case

use std::sync::Arc;

use kernel::id::{BlogId, WriterId};

use crate::domain::entity::ToggleOutcome;
use crate::domain::repository::{BlogRepository, BlogSet};
use crate::error::{BlogError, BlogResult};

pub struct ToggleBlogUseCase<B>
where
    B: BlogRepository,
{
    repo: Arc<B>,
}

impl<B> ToggleBlogUseCase<B>
where
    B: BlogRepository,
{
    pub fn new(repo: Arc<B>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        id: BlogId,
        set: BlogSet,
        writer_id: WriterId,
    ) -> BlogResult<ToggleOutcome> {
        let outcome = self
            .repo
            .toggle(id, set, writer_id)
            .await?
            .ok_or(BlogError::BlogNotFound)?;

        tracing::debug!(blog_id = %id, ?set, active = outcome.active, "Blog set toggled");

        Ok(outcome)
    }
}

/// Response message for a toggle result
pub fn toggle_message(set: BlogSet, active: bool) -> &'static str {
    match (set, active) {
        (BlogSet::Likes, true) => "Blog liked",
        (BlogSet::Likes, false) => "Blog unliked",
        (BlogSet::Favorites, true) => "Blog added to favorites",
        (BlogSet::Favorites, false) => "Blog removed from favorites",
    }
}
