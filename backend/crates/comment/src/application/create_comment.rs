//! Create Comment Use Case

use std::sync::Arc;

use kernel::id::{BlogId, CommentId, WriterId};
use kernel::validation::Validator;

use crate::domain::entity::{Comment, CommentView};
use crate::domain::repository::CommentRepository;
use crate::domain::value_object::comment_content::CommentContent;
use crate::error::{CommentError, CommentResult};

#[derive(Debug, Default)]
pub struct CreateCommentInput {
    pub content: String,
    pub blog_id: String,
    pub parent_id: Option<String>,
}

pub struct CreateCommentUseCase<C>
where
    C: CommentRepository,
{
    repo: Arc<C>,
}

impl<C> CreateCommentUseCase<C>
where
    C: CommentRepository,
{
    pub fn new(repo: Arc<C>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        author_id: WriterId,
        input: CreateCommentInput,
    ) -> CommentResult<CommentView> {
        let (content, blog_id, parent_id) = validate(input)?;
        let comment = Comment::new(author_id, blog_id, parent_id, content);
        self.repo.create(&comment).await?;

        tracing::info!(
            comment_id = %comment.id,
            blog_id = %blog_id,
            reply = comment.is_reply(),
            "Comment created"
        );

        self.repo.find_by_id(comment.id).await?.ok_or_else(|| {
            CommentError::Internal(format!("comment {} vanished after insert", comment.id))
        })
    }
}

fn validate(
    input: CreateCommentInput,
) -> CommentResult<(CommentContent, BlogId, Option<CommentId>)> {
    let mut v = Validator::new();
    let content = v.check(CommentContent::new(&input.content));
    let blog_id = v.check(BlogId::parse_field("blog", &input.blog_id));
    let parent_id = v.check(
        input
            .parent_id
            .as_deref()
            .map(|raw| CommentId::parse_field("parentComment", raw))
            .transpose(),
    );

    match (content, blog_id, parent_id) {
        (Some(content), Some(blog_id), Some(parent_id)) => Ok((content, blog_id, parent_id)),
        _ => Err(v.into_error().into()),
    }
}
