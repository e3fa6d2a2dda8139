//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use kernel::id::{BlogId, CommentId, WriterId};
use kernel::query::{ListParams, ListSpec, Page};
use kernel::response::{ApiResponse, json_body};
use kernel::validation::Validator;
use std::sync::Arc;
use writer::CurrentWriter;

use crate::application::{
    CreateCommentUseCase, ManageCommentUseCase, ReadCommentsUseCase, like_message,
    moderation_message,
};
use crate::domain::repository::{CommentRepository, CommentSort};
use crate::error::CommentResult;
use crate::presentation::dto::{
    CommentResponse, CreateCommentRequest, LikeResponse, ModerateRequest, UpdateCommentRequest,
};

/// Shared state for comment handlers
pub struct CommentAppState<C> {
    pub repo: Arc<C>,
}

impl<C> Clone for CommentAppState<C> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

fn list_spec(params: &ListParams) -> CommentResult<ListSpec<CommentSort>> {
    let mut v = Validator::new();
    match params.to_spec(&mut v) {
        Some(spec) => Ok(spec),
        None => Err(v.into_error().into()),
    }
}

/// GET /api/comments/blog/{blog_id}
pub async fn list_blog_comments<C>(
    State(state): State<CommentAppState<C>>,
    Path(blog_id): Path<String>,
    Query(params): Query<ListParams>,
) -> CommentResult<ApiResponse<Page<CommentResponse>>>
where
    C: CommentRepository + Sync + 'static,
{
    let blog_id = BlogId::parse_field("blogId", &blog_id)?;
    let spec = list_spec(&params)?;
    let page = ReadCommentsUseCase::new(state.repo.clone())
        .by_blog(blog_id, spec)
        .await?;

    Ok(ApiResponse::ok(
        "Comments fetched successfully",
        page.map(CommentResponse::from),
    ))
}

/// GET /api/comments/{id}
pub async fn get_comment<C>(
    State(state): State<CommentAppState<C>>,
    Path(id): Path<String>,
) -> CommentResult<ApiResponse<CommentResponse>>
where
    C: CommentRepository + Sync + 'static,
{
    let id = CommentId::parse_field("id", &id)?;
    let thread = ReadCommentsUseCase::new(state.repo.clone()).by_id(id).await?;

    Ok(ApiResponse::ok(
        "Comment fetched successfully",
        CommentResponse::from(thread),
    ))
}

/// GET /api/comments/writer/{writer_id}
pub async fn list_author_comments<C>(
    State(state): State<CommentAppState<C>>,
    Path(writer_id): Path<String>,
    Query(params): Query<ListParams>,
) -> CommentResult<ApiResponse<Page<CommentResponse>>>
where
    C: CommentRepository + Sync + 'static,
{
    let writer_id = WriterId::parse_field("writerId", &writer_id)?;
    let spec = list_spec(&params)?;
    let page = ReadCommentsUseCase::new(state.repo.clone())
        .by_author(writer_id, spec)
        .await?;

    Ok(ApiResponse::ok(
        "Author's comments fetched successfully",
        page.map(CommentResponse::from),
    ))
}

/// POST /api/comments
pub async fn create_comment<C>(
    State(state): State<CommentAppState<C>>,
    CurrentWriter(caller): CurrentWriter,
    payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> CommentResult<ApiResponse<CommentResponse>>
where
    C: CommentRepository + Sync + 'static,
{
    let req = json_body(payload)?;
    let view = CreateCommentUseCase::new(state.repo.clone())
        .execute(caller, req.into())
        .await?;

    Ok(ApiResponse::created(
        "Comment created successfully",
        CommentResponse::from(view),
    ))
}

/// PUT /api/comments/{id}
pub async fn update_comment<C>(
    State(state): State<CommentAppState<C>>,
    CurrentWriter(caller): CurrentWriter,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCommentRequest>, JsonRejection>,
) -> CommentResult<ApiResponse<CommentResponse>>
where
    C: CommentRepository + Sync + 'static,
{
    let id = CommentId::parse_field("id", &id)?;
    let req = json_body(payload)?;
    let view = ManageCommentUseCase::new(state.repo.clone())
        .update(caller, id, &req.content)
        .await?;

    Ok(ApiResponse::ok(
        "Comment updated successfully",
        CommentResponse::from(view),
    ))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment<C>(
    State(state): State<CommentAppState<C>>,
    CurrentWriter(caller): CurrentWriter,
    Path(id): Path<String>,
) -> CommentResult<ApiResponse<()>>
where
    C: CommentRepository + Sync + 'static,
{
    let id = CommentId::parse_field("id", &id)?;
    ManageCommentUseCase::new(state.repo.clone())
        .delete(caller, id)
        .await?;

    Ok(ApiResponse::message(
        "Comment and its replies deleted successfully",
    ))
}

/// POST /api/comments/{id}/like
pub async fn toggle_like<C>(
    State(state): State<CommentAppState<C>>,
    CurrentWriter(caller): CurrentWriter,
    Path(id): Path<String>,
) -> CommentResult<ApiResponse<LikeResponse>>
where
    C: CommentRepository + Sync + 'static,
{
    let id = CommentId::parse_field("id", &id)?;
    let outcome = ManageCommentUseCase::new(state.repo.clone())
        .toggle_like(caller, id)
        .await?;

    Ok(ApiResponse::ok(
        like_message(outcome.liked),
        LikeResponse::from(outcome),
    ))
}

/// PATCH /api/comments/{id}/moderate
pub async fn moderate_comment<C>(
    State(state): State<CommentAppState<C>>,
    CurrentWriter(caller): CurrentWriter,
    Path(id): Path<String>,
    payload: Result<Json<ModerateRequest>, JsonRejection>,
) -> CommentResult<ApiResponse<CommentResponse>>
where
    C: CommentRepository + Sync + 'static,
{
    let id = CommentId::parse_field("id", &id)?;
    let req = json_body(payload)?;
    let view = ManageCommentUseCase::new(state.repo.clone())
        .moderate(id, req.is_approved.as_ref())
        .await?;

    tracing::debug!(comment_id = %id, moderator = %caller, "Comment moderation applied");

    Ok(ApiResponse::ok(
        moderation_message(view.comment.is_approved),
        CommentResponse::from(view),
    ))
}
