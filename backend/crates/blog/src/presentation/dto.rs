//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::author::AuthorSummary;
use kernel::id::{BlogId, WriterId};
use kernel::query::ListParams;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::{CreateBlogInput, UpdateBlogInput};
use crate::domain::entity::{BlogView, ToggleOutcome};
use crate::domain::repository::BlogSet;

/// POST /api/blog
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<Value>,
}

impl From<CreateBlogRequest> for CreateBlogInput {
    fn from(req: CreateBlogRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            excerpt: req.excerpt,
            cover_image: req.cover_image,
            tags: req.tags,
            is_published: req.is_published,
        }
    }
}

/// PUT /api/blog/{id}
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<Value>,
}

impl From<UpdateBlogRequest> for UpdateBlogInput {
    fn from(req: UpdateBlogRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            excerpt: req.excerpt,
            cover_image: req.cover_image,
            tags: req.tags,
            is_published: req.is_published,
        }
    }
}

/// PATCH /api/blog/{id}/publish
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub is_published: Option<Value>,
}

/// GET /api/blog query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogListParams {
    #[serde(flatten)]
    pub list: ListParams,
    pub is_published: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse {
    pub id: BlogId,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub cover_image: Option<String>,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub writer: AuthorSummary,
    pub like_count: usize,
    pub favorite_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked_by_me: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorited_by_me: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogResponse {
    /// Render `view`, adding the caller's membership flags when known
    pub fn for_viewer(view: BlogView, viewer: Option<WriterId>) -> Self {
        let BlogView { blog, writer } = view;
        Self {
            id: blog.id,
            liked_by_me: viewer.map(|v| blog.liked_by(v)),
            favorited_by_me: viewer.map(|v| blog.favorited_by(v)),
            like_count: blog.likes.len(),
            favorite_count: blog.favorites.len(),
            title: blog.title.as_str().to_string(),
            content: blog.content.as_str().to_string(),
            excerpt: blog.excerpt.as_str().to_string(),
            cover_image: blog.cover_image,
            tags: blog.tags.as_slice().to_vec(),
            is_published: blog.is_published,
            published_at: blog.published_at,
            writer,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

/// Like / favorite toggle result
///
/// Serializes as `{liked, likeCount}` or `{favorited, favoriteCount}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ToggleResponse {
    Like {
        liked: bool,
        #[serde(rename = "likeCount")]
        like_count: u64,
    },
    Favorite {
        favorited: bool,
        #[serde(rename = "favoriteCount")]
        favorite_count: u64,
    },
}

impl ToggleResponse {
    pub fn new(set: BlogSet, outcome: ToggleOutcome) -> Self {
        match set {
            BlogSet::Likes => ToggleResponse::Like {
                liked: outcome.active,
                like_count: outcome.count,
            },
            BlogSet::Favorites => ToggleResponse::Favorite {
                favorited: outcome.active,
                favorite_count: outcome.count,
            },
        }
    }
}
