//! Manage Blog Use Case
//!
//! Owner-only mutations: update, delete and publish state.

use std::sync::Arc;

use kernel::id::{BlogId, WriterId};
use kernel::validation::{Validator, optional_flag, optional_web_url, required_flag};
use serde_json::Value;

use crate::domain::entity::{BlogPatch, BlogView};
use crate::domain::repository::BlogRepository;
use crate::domain::value_object::{
    content::{Content, Excerpt},
    tags::Tags,
    title::Title,
};
use crate::application::create_blog::PUBLISHED_MESSAGE;
use crate::error::{BlogError, BlogResult};

#[derive(Debug, Default)]
pub struct UpdateBlogInput {
    pub title: Option<String>,
    pub content: Option<String>,
    /// `Some("")` re-derives the excerpt from the content
    pub excerpt: Option<String>,
    /// `Some("")` clears the image
    pub cover_image: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Raw JSON; validated as a boolean
    pub is_published: Option<Value>,
}

pub struct ManageBlogUseCase<B>
where
    B: BlogRepository,
{
    repo: Arc<B>,
}

impl<B> ManageBlogUseCase<B>
where
    B: BlogRepository,
{
    pub fn new(repo: Arc<B>) -> Self {
        Self { repo }
    }

    pub async fn update(
        &self,
        caller: WriterId,
        id: BlogId,
        input: UpdateBlogInput,
    ) -> BlogResult<BlogView> {
        let mut view = self.owned(caller, id).await?;
        let patch = validate_patch(input)?;

        view.blog.apply(patch);
        self.repo.update(&view.blog).await?;

        tracing::info!(blog_id = %id, "Blog updated");

        Ok(view)
    }

    pub async fn set_published(
        &self,
        caller: WriterId,
        id: BlogId,
        raw: Option<&Value>,
    ) -> BlogResult<BlogView> {
        let published = required_flag("isPublished", raw, PUBLISHED_MESSAGE)?;
        let mut view = self.owned(caller, id).await?;
        view.blog.set_published(published, chrono::Utc::now());
        self.repo.update(&view.blog).await?;

        tracing::info!(blog_id = %id, published, "Blog publish state changed");

        Ok(view)
    }

    pub async fn delete(&self, caller: WriterId, id: BlogId) -> BlogResult<()> {
        self.owned(caller, id).await?;
        if !self.repo.delete(id).await? {
            return Err(BlogError::BlogNotFound);
        }

        tracing::info!(blog_id = %id, "Blog deleted");

        Ok(())
    }

    async fn owned(&self, caller: WriterId, id: BlogId) -> BlogResult<BlogView> {
        let view = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(BlogError::BlogNotFound)?;
        if !view.blog.is_owned_by(caller) {
            return Err(BlogError::NotOwner);
        }
        Ok(view)
    }
}

fn validate_patch(input: UpdateBlogInput) -> BlogResult<BlogPatch> {
    let mut v = Validator::new();

    let title = input.title.and_then(|raw| v.check(Title::new(&raw)));
    let content = input.content.and_then(|raw| v.check(Content::new(&raw)));
    let excerpt = input
        .excerpt
        .and_then(|raw| v.check(Excerpt::provided(&raw)));
    let cover_image = input
        .cover_image
        .and_then(|raw| v.check(optional_web_url("coverImage", Some(&raw))));
    let tags = input.tags.and_then(|raw| v.check(Tags::new(raw)));
    let is_published = v
        .check(optional_flag(
            "isPublished",
            input.is_published.as_ref(),
            PUBLISHED_MESSAGE,
        ))
        .flatten();

    v.finish()?;

    Ok(BlogPatch {
        title,
        content,
        excerpt,
        cover_image,
        tags,
        is_published,
    })
}
