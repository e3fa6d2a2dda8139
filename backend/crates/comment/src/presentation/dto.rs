//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::author::AuthorSummary;
use kernel::id::{BlogId, CommentId};
use serde::{Deserialize, Serialize};

use crate::application::CreateCommentInput;
use crate::domain::entity::{CommentThread, CommentView, LikeOutcome};

/// POST /api/comments
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "blogId")]
    pub blog: String,
    #[serde(alias = "parentCommentId")]
    pub parent_comment: Option<String>,
}

impl From<CreateCommentRequest> for CreateCommentInput {
    fn from(req: CreateCommentRequest) -> Self {
        Self {
            content: req.content,
            blog_id: req.blog,
            parent_id: req.parent_comment,
        }
    }
}

/// PUT /api/comments/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCommentRequest {
    #[serde(default)]
    pub content: String,
}

/// PATCH /api/comments/{id}/moderate
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerateRequest {
    pub is_approved: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogRef {
    pub id: BlogId,
    /// Absent once the blog is gone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: CommentId,
    pub content: String,
    pub author: Option<AuthorSummary>,
    pub blog: BlogRef,
    pub parent_comment: Option<CommentId>,
    pub is_approved: bool,
    pub like_count: usize,
    pub reply_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replies: Option<Vec<CommentResponse>>,
}

impl From<CommentView> for CommentResponse {
    fn from(view: CommentView) -> Self {
        let CommentView {
            comment,
            author,
            blog_title,
        } = view;
        Self {
            id: comment.id,
            content: comment.content.as_str().to_string(),
            author,
            blog: BlogRef {
                id: comment.blog_id,
                title: blog_title,
            },
            parent_comment: comment.parent_id,
            is_approved: comment.is_approved,
            like_count: comment.likes.len(),
            reply_count: comment.reply_count,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            replies: None,
        }
    }
}

impl From<CommentThread> for CommentResponse {
    fn from(thread: CommentThread) -> Self {
        Self {
            replies: Some(thread.replies.into_iter().map(Self::from).collect()),
            ..Self::from(thread.view)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub liked: bool,
    pub like_count: u64,
}

impl From<LikeOutcome> for LikeResponse {
    fn from(outcome: LikeOutcome) -> Self {
        Self {
            liked: outcome.liked,
            like_count: outcome.count,
        }
    }
}
