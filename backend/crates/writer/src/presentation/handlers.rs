//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use kernel::id::WriterId;
use kernel::query::parse_flag;
use kernel::response::{ApiResponse, json_body};
use kernel::validation::Validator;
use platform::token::TokenService;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    AuthenticateUseCase, ManageWriterUseCase, SignInInput, SignInUseCase, SignUpInput,
    SignUpUseCase, WriterProfileUseCase,
};
use crate::domain::repository::{WriterBlogStats, WriterQuery, WriterRepository};
use crate::error::WriterResult;
use crate::presentation::dto::{
    AuthResponse, CurrentWriterResponse, LoginRequest, RefreshResponse, SignUpRequest,
    UpdateWriterRequest, WriterListParams, WriterResponse, WriterStatsResponse,
};
use crate::presentation::middleware::CurrentWriter;

/// Shared state for writer and auth handlers
pub struct WriterAppState<W> {
    pub repo: Arc<W>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
}

impl<W> Clone for WriterAppState<W> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

// ============================================================================
// Auth
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<W>(
    State(state): State<WriterAppState<W>>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> WriterResult<ApiResponse<AuthResponse>>
where
    W: WriterRepository + WriterBlogStats + Sync + 'static,
{
    let req = json_body(payload)?;
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.tokens.clone(),
    );

    let output = use_case
        .execute(SignUpInput {
            name: req.name,
            email: req.email,
            password: req.password,
            bio: req.bio,
        })
        .await?;

    Ok(ApiResponse::created(
        "Writer registered successfully",
        AuthResponse::from(output),
    ))
}

/// POST /api/auth/login
pub async fn login<W>(
    State(state): State<WriterAppState<W>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> WriterResult<ApiResponse<AuthResponse>>
where
    W: WriterRepository + WriterBlogStats + Sync + 'static,
{
    let req = json_body(payload)?;
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.tokens.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(ApiResponse::ok("Login successful", AuthResponse::from(output)))
}

/// POST /api/auth/refresh
pub async fn refresh_token<W>(
    State(state): State<WriterAppState<W>>,
    CurrentWriter(writer_id): CurrentWriter,
) -> WriterResult<ApiResponse<RefreshResponse>>
where
    W: WriterRepository + WriterBlogStats + Sync + 'static,
{
    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.tokens.clone());
    let output = use_case.refresh(writer_id).await?;

    Ok(ApiResponse::ok(
        "Token refreshed successfully",
        RefreshResponse {
            writer: WriterResponse::from(&output.writer),
            token: output.token,
        },
    ))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; the client discards its copy.
pub async fn logout() -> ApiResponse<()> {
    ApiResponse::message("Logged out successfully")
}

/// GET /api/auth/writer/{writer_id}
pub async fn current_writer<W>(
    State(state): State<WriterAppState<W>>,
    Path(writer_id): Path<String>,
) -> WriterResult<ApiResponse<CurrentWriterResponse>>
where
    W: WriterRepository + WriterBlogStats + Sync + 'static,
{
    let writer_id = WriterId::parse_field("writerId", &writer_id)?;
    let writer = WriterProfileUseCase::new(state.repo.clone())
        .writer(writer_id)
        .await?;

    Ok(ApiResponse::ok(
        "Writer fetched successfully",
        CurrentWriterResponse {
            writer: WriterResponse::from(&writer),
        },
    ))
}

// ============================================================================
// Writer
// ============================================================================

/// GET /api/writer
pub async fn list_writers<W>(
    State(state): State<WriterAppState<W>>,
    Query(params): Query<WriterListParams>,
) -> WriterResult<ApiResponse<kernel::query::Page<WriterResponse>>>
where
    W: WriterRepository + WriterBlogStats + Sync + 'static,
{
    let mut v = Validator::new();
    let spec = params.list.to_spec(&mut v);
    let is_active = v.check(parse_flag("isActive", params.is_active.as_deref()));
    let (Some(spec), Some(is_active)) = (spec, is_active) else {
        return Err(v.into_error().into());
    };

    let page = WriterProfileUseCase::new(state.repo.clone())
        .list(WriterQuery { spec, is_active })
        .await?;

    Ok(ApiResponse::ok(
        "Writers fetched successfully",
        page.map(WriterResponse::from),
    ))
}

/// GET /api/writer/{id}
pub async fn get_writer<W>(
    State(state): State<WriterAppState<W>>,
    Path(id): Path<String>,
) -> WriterResult<ApiResponse<WriterResponse>>
where
    W: WriterRepository + WriterBlogStats + Sync + 'static,
{
    let id = WriterId::parse_field("id", &id)?;
    let listing = WriterProfileUseCase::new(state.repo.clone())
        .profile(id)
        .await?;

    Ok(ApiResponse::ok(
        "Writer fetched successfully",
        WriterResponse::from(listing),
    ))
}

/// GET /api/writer/{id}/stats
pub async fn writer_stats<W>(
    State(state): State<WriterAppState<W>>,
    Path(id): Path<String>,
) -> WriterResult<ApiResponse<WriterStatsResponse>>
where
    W: WriterRepository + WriterBlogStats + Sync + 'static,
{
    let id = WriterId::parse_field("id", &id)?;
    let (listing, stats) = WriterProfileUseCase::new(state.repo.clone())
        .stats(id)
        .await?;

    Ok(ApiResponse::ok(
        "Writer stats fetched successfully",
        WriterStatsResponse {
            writer: WriterResponse::from(listing),
            stats: stats.into(),
        },
    ))
}

/// PUT /api/writer/{id}
pub async fn update_writer<W>(
    State(state): State<WriterAppState<W>>,
    CurrentWriter(caller): CurrentWriter,
    Path(id): Path<String>,
    payload: Result<Json<UpdateWriterRequest>, JsonRejection>,
) -> WriterResult<ApiResponse<WriterResponse>>
where
    W: WriterRepository + WriterBlogStats + Sync + 'static,
{
    let id = WriterId::parse_field("id", &id)?;
    let req = json_body(payload)?;

    let writer = ManageWriterUseCase::new(state.repo.clone())
        .update(caller, id, req.into())
        .await?;

    Ok(ApiResponse::ok(
        "Writer updated successfully",
        WriterResponse::from(&writer),
    ))
}

/// PATCH /api/writer/{id}/deactivate
pub async fn deactivate_writer<W>(
    State(state): State<WriterAppState<W>>,
    CurrentWriter(caller): CurrentWriter,
    Path(id): Path<String>,
) -> WriterResult<ApiResponse<WriterResponse>>
where
    W: WriterRepository + WriterBlogStats + Sync + 'static,
{
    let id = WriterId::parse_field("id", &id)?;
    let writer = ManageWriterUseCase::new(state.repo.clone())
        .deactivate(caller, id)
        .await?;

    Ok(ApiResponse::ok(
        "Writer deactivated successfully",
        WriterResponse::from(&writer),
    ))
}

/// DELETE /api/writer/{id}
pub async fn delete_writer<W>(
    State(state): State<WriterAppState<W>>,
    CurrentWriter(caller): CurrentWriter,
    Path(id): Path<String>,
) -> WriterResult<ApiResponse<()>>
where
    W: WriterRepository + WriterBlogStats + Sync + 'static,
{
    let id = WriterId::parse_field("id", &id)?;
    ManageWriterUseCase::new(state.repo.clone())
        .delete(caller, id)
        .await?;

    Ok(ApiResponse::message("Writer deleted successfully"))
}
