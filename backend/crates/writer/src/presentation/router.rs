//! Writer and Auth Routers

use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};
use platform::rate_limit::{RateLimitStore, RateLimiter, enforce_rate_limit};
use platform::token::TokenService;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{WriterBlogStats, WriterRepository};
use crate::infra::postgres::PgWriterRepository;
use crate::presentation::handlers::{self, WriterAppState};
use crate::presentation::middleware::{AuthGuardState, require_auth};

fn app_state<W>(repo: Arc<W>, config: AuthConfig) -> (WriterAppState<W>, AuthGuardState<W>) {
    let tokens = Arc::new(config.token_service());
    let guard = AuthGuardState::new(repo.clone(), tokens.clone());
    let state = WriterAppState {
        repo,
        config: Arc::new(config),
        tokens,
    };
    (state, guard)
}

/// Create the Auth router with PostgreSQL repository
pub fn auth_router<L>(
    repo: PgWriterRepository,
    config: AuthConfig,
    limiter: RateLimiter<L>,
) -> Router
where
    L: RateLimitStore + Sync + 'static,
{
    auth_router_generic(Arc::new(repo), config, limiter)
}

/// Create a generic Auth router for any repository implementation
///
/// `limiter` guards signup and login only.
pub fn auth_router_generic<W, L>(repo: Arc<W>, config: AuthConfig, limiter: RateLimiter<L>) -> Router
where
    W: WriterRepository + WriterBlogStats + Sync + 'static,
    L: RateLimitStore + Sync + 'static,
{
    let (state, guard) = app_state(repo, config);

    let limited = Router::new()
        .route("/signup", post(handlers::sign_up::<W>))
        .route("/login", post(handlers::login::<W>))
        .route_layer(middleware::from_fn_with_state(limiter, enforce_rate_limit::<L>));

    let protected = Router::new()
        .route("/refresh", post(handlers::refresh_token::<W>))
        .route_layer(middleware::from_fn_with_state(guard, require_auth::<W>));

    Router::new()
        .route("/logout", post(handlers::logout))
        .route("/writer/{writer_id}", get(handlers::current_writer::<W>))
        .merge(limited)
        .merge(protected)
        .with_state(state)
}

/// Create the Writer router with PostgreSQL repository
pub fn writer_router(repo: PgWriterRepository, config: AuthConfig) -> Router {
    writer_router_generic(Arc::new(repo), config)
}

/// Create a generic Writer router for any repository implementation
pub fn writer_router_generic<W>(repo: Arc<W>, config: AuthConfig) -> Router
where
    W: WriterRepository + WriterBlogStats + Sync + 'static,
{
    let (state, guard) = app_state(repo, config);

    let protected = Router::new()
        .route(
            "/{id}",
            put(handlers::update_writer::<W>).delete(handlers::delete_writer::<W>),
        )
        .route("/{id}/deactivate", patch(handlers::deactivate_writer::<W>))
        .route_layer(middleware::from_fn_with_state(guard, require_auth::<W>));

    Router::new()
        .route("/", get(handlers::list_writers::<W>))
        .route("/{id}", get(handlers::get_writer::<W>))
        .route("/{id}/stats", get(handlers::writer_stats::<W>))
        .merge(protected)
        .with_state(state)
}
