//! Blog Router

use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};
use std::sync::Arc;
use writer::domain::repository::WriterRepository;
use writer::{AuthGuardState, optional_auth, require_auth};

use crate::domain::repository::BlogRepository;
use crate::infra::postgres::PgBlogRepository;
use crate::presentation::handlers::{self, BlogAppState};

/// Create the Blog router with PostgreSQL repository
pub fn blog_router<W>(repo: PgBlogRepository, guard: AuthGuardState<W>) -> Router
where
    W: WriterRepository + Sync + 'static,
{
    blog_router_generic(Arc::new(repo), guard)
}

/// Create a generic Blog router for any repository implementation
///
/// Reads resolve the caller when a token is present; writes require one.
pub fn blog_router_generic<B, W>(repo: Arc<B>, guard: AuthGuardState<W>) -> Router
where
    B: BlogRepository + Sync + 'static,
    W: WriterRepository + Sync + 'static,
{
    let state = BlogAppState { repo };

    let public = Router::new()
        .route("/", get(handlers::list_blogs::<B>))
        .route("/{id}", get(handlers::get_blog::<B>))
        .route("/writer/{writer_id}", get(handlers::list_writer_blogs::<B>))
        .route_layer(middleware::from_fn_with_state(
            guard.clone(),
            optional_auth::<W>,
        ));

    let protected = Router::new()
        .route("/", post(handlers::create_blog::<B>))
        .route(
            "/{id}",
            put(handlers::update_blog::<B>).delete(handlers::delete_blog::<B>),
        )
        .route("/{id}/publish", patch(handlers::set_published::<B>))
        .route("/{id}/like", post(handlers::toggle_like::<B>))
        .route("/{id}/favorite", post(handlers::toggle_favorite::<B>))
        .route("/favorites/me", get(handlers::my_favorites::<B>))
        .route("/likes/me", get(handlers::my_likes::<B>))
        .route_layer(middleware::from_fn_with_state(guard, require_auth::<W>));

    Router::new()
        .merge(public)
        .merge(protected)
        .with_state(state)
}
