//! Auth Middleware
//!
//! Bearer-token guards shared by every router that has protected routes.
//! `require_auth` rejects the request; `optional_auth` never does.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::id::WriterId;
use platform::client::extract_bearer_token;
use platform::token::TokenService;

use crate::application::AuthenticateUseCase;
use crate::domain::repository::WriterRepository;
use crate::error::WriterError;

/// Middleware state
pub struct AuthGuardState<W> {
    pub repo: Arc<W>,
    pub tokens: Arc<TokenService>,
}

impl<W> Clone for AuthGuardState<W> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

impl<W> AuthGuardState<W> {
    pub fn new(repo: Arc<W>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }
}

/// Authenticated caller, stored in request extensions by [`require_auth`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentWriter(pub WriterId);

/// Caller identity when present, stored by [`optional_auth`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewer(pub Option<WriterId>);

/// Middleware that requires an active writer behind a valid bearer token
pub async fn require_auth<W>(
    State(state): State<AuthGuardState<W>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    W: WriterRepository + Sync + 'static,
{
    let token = extract_bearer_token(req.headers()).map(str::to_owned);
    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.tokens.clone());

    match use_case.execute(token.as_deref()).await {
        Ok(writer) => {
            req.extensions_mut().insert(CurrentWriter(writer.id));
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}

/// Middleware that resolves the caller when it can and continues either way
pub async fn optional_auth<W>(
    State(state): State<AuthGuardState<W>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    W: WriterRepository + Sync + 'static,
{
    let viewer = match extract_bearer_token(req.headers()).map(str::to_owned) {
        Some(token) => {
            let use_case = AuthenticateUseCase::new(state.repo.clone(), state.tokens.clone());
            match use_case.execute(Some(&token)).await {
                Ok(writer) => Some(writer.id),
                Err(e) => {
                    tracing::debug!(error = %e, "Optional auth ignored token");
                    None
                }
            }
        }
        None => None,
    };

    req.extensions_mut().insert(Viewer(viewer));
    next.run(req).await
}

impl<S> FromRequestParts<S> for CurrentWriter
where
    S: Send + Sync,
{
    type Rejection = WriterError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only reachable without the guard when a route was wired incorrectly.
        parts
            .extensions
            .get::<CurrentWriter>()
            .copied()
            .ok_or(WriterError::TokenMissing)
    }
}

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Viewer>().copied().unwrap_or_default())
    }
}
