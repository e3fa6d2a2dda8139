//! Sign In Use Case
//!
//! Verifies email and password and issues a bearer token.

use std::sync::Arc;

use kernel::validation::Validator;
use platform::token::TokenService;

use crate::application::config::AuthConfig;
use crate::application::sign_up::AuthOutput;
use crate::domain::repository::WriterRepository;
use crate::domain::value_object::{email::Email, writer_password::RawPassword};
use crate::error::{WriterError, WriterResult};

pub struct SignInInput {
    pub email: String,
    pub password: String,
}

pub struct SignInUseCase<W>
where
    W: WriterRepository,
{
    repo: Arc<W>,
    config: Arc<AuthConfig>,
    tokens: Arc<TokenService>,
}

impl<W> SignInUseCase<W>
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

    pub async fn execute(&self, input: SignInInput) -> WriterResult<AuthOutput> {
        let mut v = Validator::new();
        let email = v.check(Email::new(input.email));
        let password = v.check(RawPassword::for_login(input.password));
        let (Some(email), Some(password)) = (email, password) else {
            return Err(v.into_error().into());
        };

        let writer = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(WriterError::InvalidCredentials)?;

        if !writer.password_hash.verify(&password, self.config.pepper()) {
            return Err(WriterError::InvalidCredentials);
        }

        // Checked after the password so the response does not reveal
        // which emails belong to deactivated accounts.
        if !writer.can_login() {
            return Err(WriterError::AccountDeactivated);
        }

        let token = self.tokens.issue(writer.id.into_uuid())?;

        tracing::info!(writer_id = %writer.id, "Writer signed in");

        Ok(AuthOutput { writer, token })
    }
}
