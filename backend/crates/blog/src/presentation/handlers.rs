//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use kernel::id::{BlogId, WriterId};
use kernel::query::{ListParams, Page, parse_flag};
use kernel::response::{ApiResponse, json_body};
use kernel::validation::Validator;
use std::sync::Arc;
use writer::{CurrentWriter, Viewer};

use crate::application::{
    CreateBlogUseCase, ManageBlogUseCase, ReadBlogsUseCase, ToggleBlogUseCase, toggle_message,
};
use crate::domain::repository::{BlogQuery, BlogRepository, BlogSet, BlogSort};
use crate::error::BlogResult;
use crate::presentation::dto::{
    BlogListParams, BlogResponse, CreateBlogRequest, PublishRequest, ToggleResponse,
    UpdateBlogRequest,
};

/// Shared state for blog handlers
pub struct BlogAppState<B> {
    pub repo: Arc<B>,
}

impl<B> Clone for BlogAppState<B> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

/// POST /api/blog
pub async fn create_blog<B>(
    State(state): State<BlogAppState<B>>,
    CurrentWriter(caller): CurrentWriter,
    payload: Result<Json<CreateBlogRequest>, JsonRejection>,
) -> BlogResult<ApiResponse<BlogResponse>>
where
    B: BlogRepository + Sync + 'static,
{
    let req = json_body(payload)?;
    let view = CreateBlogUseCase::new(state.repo.clone())
        .execute(caller, req.into())
        .await?;

    Ok(ApiResponse::created(
        "Blog created successfully",
        BlogResponse::for_viewer(view, Some(caller)),
    ))
}

/// GET /api/blog
pub async fn list_blogs<B>(
    State(state): State<BlogAppState<B>>,
    Viewer(viewer): Viewer,
    Query(params): Query<BlogListParams>,
) -> BlogResult<ApiResponse<Page<BlogResponse>>>
where
    B: BlogRepository + Sync + 'static,
{
    let query = blog_query(&params)?;
    let page = ReadBlogsUseCase::new(state.repo.clone()).list(query).await?;

    Ok(ApiResponse::ok(
        "Blogs fetched successfully",
        page.map(|view| BlogResponse::for_viewer(view, viewer)),
    ))
}

/// GET /api/blog/writer/{writer_id}
pub async fn list_writer_blogs<B>(
    State(state): State<BlogAppState<B>>,
    Viewer(viewer): Viewer,
    Path(writer_id): Path<String>,
    Query(params): Query<BlogListParams>,
) -> BlogResult<ApiResponse<Page<BlogResponse>>>
where
    B: BlogRepository + Sync + 'static,
{
    let writer_id = WriterId::parse_field("writerId", &writer_id)?;
    let query = BlogQuery {
        writer_id: Some(writer_id),
        ..blog_query(&params)?
    };
    let page = ReadBlogsUseCase::new(state.repo.clone()).list(query).await?;

    Ok(ApiResponse::ok(
        "Writer's blogs fetched successfully",
        page.map(|view| BlogResponse::for_viewer(view, viewer)),
    ))
}

/// GET /api/blog/{id}
pub async fn get_blog<B>(
    State(state): State<BlogAppState<B>>,
    Viewer(viewer): Viewer,
    Path(id): Path<String>,
) -> BlogResult<ApiResponse<BlogResponse>>
where
    B: BlogRepository + Sync + 'static,
{
    let id = BlogId::parse_field("id", &id)?;
    let view = ReadBlogsUseCase::new(state.repo.clone())
        .get(id)
        .await?;

    Ok(ApiResponse::ok(
        "Blog fetched successfully",
        BlogResponse::for_viewer(view, viewer),
    ))
}

/// PUT /api/blog/{id}
pub async fn update_blog<B>(
    State(state): State<BlogAppState<B>>,
    CurrentWriter(caller): CurrentWriter,
    Path(id): Path<String>,
    payload: Result<Json<UpdateBlogRequest>, JsonRejection>,
) -> BlogResult<ApiResponse<BlogResponse>>
where
    B: BlogRepository + Sync + 'static,
{
    let id = BlogId::parse_field("id", &id)?;
    let req = json_body(payload)?;
    let view = ManageBlogUseCase::new(state.repo.clone())
        .update(caller, id, req.into())
        .await?;

    Ok(ApiResponse::ok(
        "Blog updated successfully",
        BlogResponse::for_viewer(view, Some(caller)),
    ))
}

/// PATCH /api/blog/{id}/publish
pub async fn set_published<B>(
    State(state): State<BlogAppState<B>>,
    CurrentWriter(caller): CurrentWriter,
    Path(id): Path<String>,
    payload: Result<Json<PublishRequest>, JsonRejection>,
) -> BlogResult<ApiResponse<BlogResponse>>
where
    B: BlogRepository + Sync + 'static,
{
    let id = BlogId::parse_field("id", &id)?;
    let req = json_body(payload)?;
    let view = ManageBlogUseCase::new(state.repo.clone())
        .set_published(caller, id, req.is_published.as_ref())
        .await?;

    let message = if view.blog.is_published {
        "Blog published successfully"
    } else {
        "Blog unpublished successfully"
    };
    Ok(ApiResponse::ok(
        message,
        BlogResponse::for_viewer(view, Some(caller)),
    ))
}

/// DELETE /api/blog/{id}
pub async fn delete_blog<B>(
    State(state): State<BlogAppState<B>>,
    CurrentWriter(caller): CurrentWriter,
    Path(id): Path<String>,
) -> BlogResult<ApiResponse<()>>
where
    B: BlogRepository + Sync + 'static,
{
    let id = BlogId::parse_field("id", &id)?;
    ManageBlogUseCase::new(state.repo.clone())
        .delete(caller, id)
        .await?;

    Ok(ApiResponse::message("Blog deleted successfully"))
}

/// POST /api/blog/{id}/like
pub async fn toggle_like<B>(
    state: State<BlogAppState<B>>,
    caller: CurrentWriter,
    id: Path<String>,
) -> BlogResult<ApiResponse<ToggleResponse>>
where
    B: BlogRepository + Sync + 'static,
{
    toggle(state, caller, id, BlogSet::Likes).await
}

/// POST /api/blog/{id}/favorite
pub async fn toggle_favorite<B>(
    state: State<BlogAppState<B>>,
    caller: CurrentWriter,
    id: Path<String>,
) -> BlogResult<ApiResponse<ToggleResponse>>
where
    B: BlogRepository + Sync + 'static,
{
    toggle(state, caller, id, BlogSet::Favorites).await
}

async fn toggle<B>(
    State(state): State<BlogAppState<B>>,
    CurrentWriter(caller): CurrentWriter,
    Path(id): Path<String>,
    set: BlogSet,
) -> BlogResult<ApiResponse<ToggleResponse>>
where
    B: BlogRepository + Sync + 'static,
{
    let id = BlogId::parse_field("id", &id)?;
    let outcome = ToggleBlogUseCase::new(state.repo.clone())
        .execute(id, set, caller)
        .await?;

    Ok(ApiResponse::ok(
        toggle_message(set, outcome.active),
        ToggleResponse::new(set, outcome),
    ))
}

/// GET /api/blog/favorites/me
pub async fn my_favorites<B>(
    state: State<BlogAppState<B>>,
    caller: CurrentWriter,
    params: Query<ListParams>,
) -> BlogResult<ApiResponse<Page<BlogResponse>>>
where
    B: BlogRepository + Sync + 'static,
{
    my_set(state, caller, params, BlogSet::Favorites, "Favorite blogs fetched successfully").await
}

/// GET /api/blog/likes/me
pub async fn my_likes<B>(
    state: State<BlogAppState<B>>,
    caller: CurrentWriter,
    params: Query<ListParams>,
) -> BlogResult<ApiResponse<Page<BlogResponse>>>
where
    B: BlogRepository + Sync + 'static,
{
    my_set(state, caller, params, BlogSet::Likes, "Liked blogs fetched successfully").await
}

async fn my_set<B>(
    State(state): State<BlogAppState<B>>,
    CurrentWriter(caller): CurrentWriter,
    Query(params): Query<ListParams>,
    set: BlogSet,
    message: &'static str,
) -> BlogResult<ApiResponse<Page<BlogResponse>>>
where
    B: BlogRepository + Sync + 'static,
{
    let mut v = Validator::new();
    let Some(spec) = params.to_spec::<BlogSort>(&mut v) else {
        return Err(v.into_error().into());
    };

    let page = ReadBlogsUseCase::new(state.repo.clone())
        .member_of(set, caller, spec)
        .await?;

    Ok(ApiResponse::ok(
        message,
        page.map(|view| BlogResponse::for_viewer(view, Some(caller))),
    ))
}

fn blog_query(params: &BlogListParams) -> BlogResult<BlogQuery> {
    let mut v = Validator::new();
    let spec = params.list.to_spec(&mut v);
    let is_published = v.check(parse_flag("isPublished", params.is_published.as_deref()));
    let (Some(spec), Some(is_published)) = (spec, is_published) else {
        return Err(v.into_error().into());
    };

    Ok(BlogQuery {
        spec,
        is_published,
        ..Default::default()
    })
}
