//! Create Blog Use Case

use std::sync::Arc;

use kernel::id::WriterId;
use kernel::validation::{Validator, optional_flag, optional_web_url};
use serde_json::Value;

use crate::domain::entity::{Blog, BlogView, NewBlog};
use crate::domain::repository::BlogRepository;
use crate::domain::value_object::{
    content::{Content, Excerpt},
    tags::Tags,
    title::Title,
};
use crate::error::{BlogError, BlogResult};

#[derive(Debug, Default)]
pub struct CreateBlogInput {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Raw JSON; validated as a boolean
    pub is_published: Option<Value>,
}

pub struct CreateBlogUseCase<B>
where
    B: BlogRepository,
{
    repo: Arc<B>,
}

impl<B> CreateBlogUseCase<B>
where
    B: BlogRepository,
{
    pub fn new(repo: Arc<B>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, writer_id: WriterId, input: CreateBlogInput) -> BlogResult<BlogView> {
        let new = validate(input)?;
        let blog = Blog::new(writer_id, new);
        self.repo.create(&blog).await?;

        tracing::info!(blog_id = %blog.id, writer_id = %writer_id, "Blog created");

        self.repo
            .find_by_id(blog.id)
            .await?
            .ok_or_else(|| BlogError::Internal(format!("blog {} vanished after insert", blog.id)))
    }
}

pub(crate) const PUBLISHED_MESSAGE: &str = "isPublished must be a boolean value";

fn validate(input: CreateBlogInput) -> BlogResult<NewBlog> {
    let mut v = Validator::new();
    let title = v.check(Title::new(&input.title));
    let content = v.check(Content::new(&input.content));
    let excerpt = v.check(input.excerpt.as_deref().map(Excerpt::provided).transpose());
    let cover_image = v.check(optional_web_url("coverImage", input.cover_image.as_deref()));
    let tags = v.check(Tags::new(input.tags.unwrap_or_default()));
    let is_published = v.check(optional_flag(
        "isPublished",
        input.is_published.as_ref(),
        PUBLISHED_MESSAGE,
    ));

    match (title, content, excerpt, cover_image, tags, is_published) {
        (
            Some(title),
            Some(content),
            Some(excerpt),
            Some(cover_image),
            Some(tags),
            Some(is_published),
        ) => Ok(NewBlog {
            title,
            content,
            excerpt: excerpt.flatten(),
            cover_image,
            tags,
            is_published: is_published.unwrap_or(false),
        }),
        _ => Err(v.into_error().into()),
    }
}
