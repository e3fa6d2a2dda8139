//! Comment Router

use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};
use std::sync::Arc;
use writer::domain::repository::WriterRepository;
use writer::{AuthGuardState, require_auth};

use crate::domain::repository::CommentRepository;
use crate::infra::postgres::PgCommentRepository;
use crate::presentation::handlers::{self, CommentAppState};

/// Create the Comment router with PostgreSQL repository
pub fn comment_router<W>(repo: PgCommentRepository, guard: AuthGuardState<W>) -> Router
where
    W: WriterRepository + Sync + 'static,
{
    comment_router_generic(Arc::new(repo), guard)
}

/// Create a generic Comment router for any repository implementation
pub fn comment_router_generic<C, W>(repo: Arc<C>, guard: AuthGuardState<W>) -> Router
where
    C: CommentRepository + Sync + 'static,
    W: WriterRepository + Sync + 'static,
{
    let state = CommentAppState { repo };

    let protected = Router::new()
        .route("/", post(handlers::create_comment::<C>))
        .route(
            "/{id}",
            put(handlers::update_comment::<C>).delete(handlers::delete_comment::<C>),
        )
        .route("/{id}/like", post(handlers::toggle_like::<C>))
        .route("/{id}/moderate", patch(handlers::moderate_comment::<C>))
        .route_layer(middleware::from_fn_with_state(guard, require_auth::<W>));

    Router::new()
        .route("/blog/{blog_id}", get(handlers::list_blog_comments::<C>))
        .route("/{id}", get(handlers::get_comment::<C>))
        .route("/writer/{writer_id}", get(handlers::list_author_comments::<C>))
        .merge(protected)
        .with_state(state)
}
