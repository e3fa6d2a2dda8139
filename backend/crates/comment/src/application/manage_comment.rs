//! Manage Comment Use Case
//!
//! Author-only edit and delete, likes, and moderation.

use std::sync::Arc;

use kernel::id::CommentId;
use kernel::id::WriterId;
use kernel::validation::required_flag;
use serde_json::Value;

use crate::domain::entity::{CommentView, DeleteOutcome, LikeOutcome};
use crate::domain::repository::CommentRepository;
use crate::domain::value_object::comment_content::CommentContent;
use crate::error::{CommentError, CommentResult};

pub struct ManageCommentUseCase<C>
where
    C: CommentRepository,
{
    repo: Arc<C>,
}

impl<C> ManageCommentUseCase<C>
where
    C: CommentRepository,
{
    pub fn new(repo: Arc<C>) -> Self {
        Self { repo }
    }

    pub async fn update(
        &self,
        caller: WriterId,
        id: CommentId,
        content: &str,
    ) -> CommentResult<CommentView> {
        let content = CommentContent::new(content)?;
        let updated = self
            .repo
            .update_content(id, caller, &content, chrono::Utc::now())
            .await?;
        if !updated {
            return Err(CommentError::NotFoundOrForbidden);
        }

        tracing::info!(comment_id = %id, "Comment updated");

        self.repo
            .find_by_id(id)
            .await?
            .ok_or(CommentError::CommentNotFound)
    }

    pub async fn delete(&self, caller: WriterId, id: CommentId) -> CommentResult<DeleteOutcome> {
        let outcome = self
            .repo
            .delete(id, caller)
            .await?
            .ok_or(CommentError::NotFoundOrForbidden)?;

        tracing::info!(
            comment_id = %id,
            replies_removed = outcome.replies_removed,
            "Comment deleted"
        );

        Ok(outcome)
    }

    pub async fn toggle_like(&self, caller: WriterId, id: CommentId) -> CommentResult<LikeOutcome> {
        let outcome = self
            .repo
            .toggle_like(id, caller)
            .await?
            .ok_or(CommentError::CommentNotFound)?;

        tracing::debug!(comment_id = %id, liked = outcome.liked, "Comment like toggled");

        Ok(outcome)
    }

    /// Approve or reject; open to any authenticated writer
    pub async fn moderate(&self, id: CommentId, raw: Option<&Value>) -> CommentResult<CommentView> {
        let approved = required_flag("isApproved", raw, "isApproved must be a boolean")?;
        let mut view = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(CommentError::CommentNotFound)?;

        if !self.repo.set_approved(id, approved).await? {
            return Err(CommentError::CommentNotFound);
        }
        view.comment.is_approved = approved;

        tracing::info!(comment_id = %id, approved, "Comment moderated");

        Ok(view)
    }
}

pub fn like_message(liked: bool) -> &'static str {
    if liked { "Comment liked" } else { "Comment unliked" }
}

pub fn moderation_message(approved: bool) -> &'static str {
    if approved {
        "Comment approved successfully"
    } else {
        "Comment rejected successfully"
    }
}
