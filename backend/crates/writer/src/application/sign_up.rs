//! Sign Up Use Case
//!
//! Registers a new writer and issues a bearer token.

use std::sync::Arc;

use kernel::validation::Validator;
use platform::token::TokenService;

use crate::application::config::AuthConfig;
use crate::domain::entity::Writer;
use crate::domain::repository::WriterRepository;
use crate::domain::value_object::{
    bio::Bio,
    email::Email,
    writer_name::WriterName,
    writer_password::{RawPassword, WriterPassword},
};
use crate::error::{WriterError, WriterResult};

pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub bio: Option<String>,
}

/// Writer plus a freshly issued token (shared by sign up, sign in and refresh)
pub struct AuthOutput {
    pub writer: Writer,
    pub token: String,
}

pub struct SignUpUseCase<W>
where
    W: WriterRepository,
{
    repo: Arc<W>,
    config: Arc<AuthConfig>,
    tokens: Arc<TokenService>,
}

impl<W> SignUpUseCase<W>
where
    W: WriterRepository,
{
    pub fn new(repo: Arc<W>, config: Arc<AuthConfig>, tokens: Arc<TokenService>) -> Self {
        Self {
            repo,
            config,
            tokens,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> WriterResult<AuthOutput> {
        let mut v = Validator::new();
        let name = v.check(WriterName::new(input.name));
        let email = v.check(Email::new(input.email));
        let password = v.check(RawPassword::new(input.password));
        let bio = v.check(input.bio.map(Bio::new).transpose());

        let (Some(name), Some(email), Some(password), Some(bio)) = (name, email, password, bio)
        else {
            return Err(v.into_error().into());
        };

        if self.repo.exists_by_email(&email).await? {
            return Err(WriterError::EmailTaken);
        }

        let password_hash = WriterPassword::from_raw(&password, self.config.pepper())?;
        let writer = Writer::new(name, email, password_hash, bio.unwrap_or_default());

        // The unique index still catches a concurrent signup with the same email.
        self.repo.create(&writer).await?;

        let token = self.tokens.issue(writer.id.into_uuid())?;

        tracing::info!(writer_id = %writer.id, "Writer signed up");

        Ok(AuthOutput { writer, token })
    }
}
