//! Comment Entity
//!
//! Comments thread one level deep in practice: a reply points at its parent
//! and the parent keeps a denormalized `reply_count`.

use chrono::{DateTime, Utc};
use kernel::author::AuthorSummary;
use kernel::id::{BlogId, CommentId, WriterId};

use crate::domain::value_object::comment_content::CommentContent;

#[derive(Debug, Clone)]
pub struct Comment {
    pub id: CommentId,
    pub content: CommentContent,
    pub author_id: WriterId,
    pub blog_id: BlogId,
    pub parent_id: Option<CommentId>,
    pub is_approved: bool,
    pub likes: Vec<WriterId>,
    /// Number of comments whose parent is this one
    pub reply_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// New approved comment with no likes or replies
    pub fn new(
        author_id: WriterId,
        blog_id: BlogId,
        parent_id: Option<CommentId>,
        content: CommentContent,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: CommentId::new(),
            content,
            author_id,
            blog_id,
            parent_id,
            is_approved: true,
            likes: Vec::new(),
            reply_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    pub fn liked_by(&self, writer_id: WriterId) -> bool {
        self.likes.contains(&writer_id)
    }
}

/// Comment joined with its author and the title of its blog
///
/// `author` is `None` once the writer has been deleted, `blog_title` once
/// the blog has.
#[derive(Debug, Clone)]
pub struct CommentView {
    pub comment: Comment,
    pub author: Option<AuthorSummary>,
    pub blog_title: Option<String>,
}

/// A comment with its direct replies, oldest reply first
#[derive(Debug, Clone)]
pub struct CommentThread {
    pub view: CommentView,
    pub replies: Vec<CommentView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeOutcome {
    pub liked: bool,
    pub count: u64,
}

/// What a delete removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Direct replies removed along with the comment
    pub replies_removed: u64,
    pub parent_id: Option<CommentId>,
}
