//! Blog Entity
//!
//! A post owned by one writer. Carries the like and favorite sets as
//! writer references.

use chrono::{DateTime, Utc};
use kernel::author::AuthorSummary;
use kernel::id::{BlogId, WriterId};

use crate::domain::value_object::{
    content::{Content, Excerpt},
    tags::Tags,
    title::Title,
};

#[derive(Debug, Clone)]
pub struct Blog {
    pub id: BlogId,
    pub title: Title,
    pub content: Content,
    pub excerpt: Excerpt,
    pub cover_image: Option<String>,
    pub tags: Tags,
    pub is_published: bool,
    /// Set on the first move to published, never cleared
    pub published_at: Option<DateTime<Utc>>,
    pub writer_id: WriterId,
    pub likes: Vec<WriterId>,
    pub favorites: Vec<WriterId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a new blog
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: Title,
    pub content: Content,
    pub excerpt: Option<Excerpt>,
    pub cover_image: Option<String>,
    pub tags: Tags,
    pub is_published: bool,
}

impl Blog {
    /// Build a blog for `writer_id`, deriving the excerpt when none was given
    pub fn new(writer_id: WriterId, new: NewBlog) -> Self {
        let now = Utc::now();
        let excerpt = new
            .excerpt
            .unwrap_or_else(|| Excerpt::derive(&new.content));
        let mut blog = Self {
            id: BlogId::new(),
            title: new.title,
            content: new.content,
            excerpt,
            cover_image: new.cover_image,
            tags: new.tags,
            is_published: false,
            published_at: None,
            writer_id,
            likes: Vec::new(),
            favorites: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        blog.set_published(new.is_published, now);
        blog
    }

    pub fn is_owned_by(&self, writer_id: WriterId) -> bool {
        self.writer_id == writer_id
    }

    /// Publish transition: `published_at` is stamped only when moving to
    /// published with no previous stamp.
    pub fn set_published(&mut self, published: bool, now: DateTime<Utc>) {
        if published && self.published_at.is_none() {
            self.published_at = Some(now);
        }
        self.is_published = published;
        self.updated_at = now;
    }

    /// Apply a validated patch; absent fields stay unchanged
    pub fn apply(&mut self, patch: BlogPatch) {
        let now = Utc::now();
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(excerpt) = patch.excerpt {
            self.excerpt = excerpt.unwrap_or_else(|| Excerpt::derive(&self.content));
        }
        if let Some(cover_image) = patch.cover_image {
            self.cover_image = cover_image;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        match patch.is_published {
            Some(published) => self.set_published(published, now),
            None => self.updated_at = now,
        }
    }

    pub fn liked_by(&self, writer_id: WriterId) -> bool {
        self.likes.contains(&writer_id)
    }

    pub fn favorited_by(&self, writer_id: WriterId) -> bool {
        self.favorites.contains(&writer_id)
    }
}

/// Validated partial update
///
/// `excerpt: Some(None)` re-derives the excerpt from the (possibly new)
/// content; `cover_image: Some(None)` clears the image.
#[derive(Debug, Clone, Default)]
pub struct BlogPatch {
    pub title: Option<Title>,
    pub content: Option<Content>,
    pub excerpt: Option<Option<Excerpt>>,
    pub cover_image: Option<Option<String>>,
    pub tags: Option<Tags>,
    pub is_published: Option<bool>,
}

/// Blog joined with its writer's public summary
#[derive(Debug, Clone)]
pub struct BlogView {
    pub blog: Blog,
    pub writer: AuthorSummary,
}

/// Resulting state of a like or favorite toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Caller is in the set after the toggle
    pub active: bool,
    pub count: u64,
}
