//! Comment Read Use Cases
//!
//! Threaded listing per blog, single comment with replies, and the
//! per-author listing.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::{BlogId, CommentId, WriterId};
use kernel::query::{ListSpec, Page};

use crate::domain::entity::{CommentThread, CommentView};
use crate::domain::repository::{CommentRepository, CommentSort};
use crate::error::{CommentError, CommentResult};

pub struct ReadCommentsUseCase<C>
where
    C: CommentRepository,
{
    repo: Arc<C>,
}

impl<C> ReadCommentsUseCase<C>
where
    C: CommentRepository,
{
    pub fn new(repo: Arc<C>) -> Self {
        Self { repo }
    }

    /// Approved top-level comments, each with its approved replies
    ///
    /// Replies are always oldest first whatever the top-level sort.
    pub async fn by_blog(
        &self,
        blog_id: BlogId,
        spec: ListSpec<CommentSort>,
    ) -> CommentResult<Page<CommentThread>> {
        let (top, total) = self.repo.list_top_level(blog_id, &spec).await?;
        let ids: Vec<CommentId> = top.iter().map(|view| view.comment.id).collect();
        let replies = if ids.is_empty() {
            Vec::new()
        } else {
            self.repo.replies(&ids, true).await?
        };

        let threads = attach_replies(top, replies);
        Ok(Page::new("comments", threads, total, spec.page))
    }

    pub async fn by_id(&self, id: CommentId) -> CommentResult<CommentThread> {
        let view = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(CommentError::CommentNotFound)?;
        let replies = self.repo.replies(&[id], false).await?;

        Ok(CommentThread { view, replies })
    }

    pub async fn by_author(
        &self,
        author_id: WriterId,
        spec: ListSpec<CommentSort>,
    ) -> CommentResult<Page<CommentView>> {
        let (items, total) = self.repo.list_by_author(author_id, &spec).await?;
        Ok(Page::new("comments", items, total, spec.page))
    }
}

/// Group `replies` under their parents, keeping both input orders
fn attach_replies(top: Vec<CommentView>, replies: Vec<CommentView>) -> Vec<CommentThread> {
    let mut by_parent: HashMap<CommentId, Vec<CommentView>> = HashMap::new();
    for reply in replies {
        if let Some(parent) = reply.comment.parent_id {
            by_parent.entry(parent).or_default().push(reply);
        }
    }

    top.into_iter()
        .map(|view| CommentThread {
            replies: by_parent.remove(&view.comment.id).unwrap_or_default(),
            view,
        })
        .collect()
}
