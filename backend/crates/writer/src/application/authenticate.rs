//! Authenticate Use Case
//!
//! Resolves a bearer token to an active writer. Backs the auth guard
//! middleware and token refresh.

use std::sync::Arc;

use kernel::id::WriterId;
use platform::token::TokenService;

use crate::application::sign_up::AuthOutput;
use crate::domain::entity::Writer;
use crate::domain::repository::WriterRepository;
use crate::error::{WriterError, WriterResult};

pub struct AuthenticateUseCase<W>
where
    W: WriterRepository,
{
    repo: Arc<W>,
    tokens: Arc<TokenService>,
}

impl<W> AuthenticateUseCase<W>
where
    W: WriterRepository,
{
    pub fn new(repo: Arc<W>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    /// Token to active writer
    ///
    /// | cause | error |
    /// |---|---|
    /// | no token | `TokenMissing` |
    /// | bad signature, malformed, wrong iss/aud | `TokenInvalid` |
    /// | past `exp` | `TokenExpired` |
    /// | writer gone or inactive | `InactiveWriter` |
    pub async fn execute(&self, token: Option<&str>) -> WriterResult<Writer> {
        let token = token.ok_or(WriterError::TokenMissing)?;
        let claims = self.tokens.verify(token)?;
        self.active_writer(WriterId::from(claims.writer_id)).await
    }

    /// Issue a new token for an already authenticated writer
    pub async fn refresh(&self, writer_id: WriterId) -> WriterResult<AuthOutput> {
        let writer = self.active_writer(writer_id).await?;
        let token = self.tokens.issue(writer.id.into_uuid())?;

        tracing::debug!(writer_id = %writer.id, "Token refreshed");

        Ok(AuthOutput { writer, token })
    }

    async fn active_writer(&self, writer_id: WriterId) -> WriterResult<Writer> {
        match self.repo.find_by_id(writer_id).await? {
            Some(writer) if writer.is_active => Ok(writer),
            _ => Err(WriterError::InactiveWriter),
        }
    }
}
