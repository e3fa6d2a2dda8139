//! Bearer Token Issuing and Verification
//!
//! Stateless HS256 JSON Web Tokens identifying a writer.
//!
//! Claims: `writerId`, `iss = "blog-api"`, `aud = "blog-users"`, `iat`, `exp`.
//! Logout is client-side; there is no revocation list.

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const TOKEN_ISSUER: &str = "blog-api";
pub const TOKEN_AUDIENCE: &str = "blog-users";

/// Default lifetime (7 days)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub writer_id: Uuid,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    /// Malformed, wrong signature, wrong issuer or audience
    #[error("Invalid token")]
    Invalid,

    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Issues and verifies writer tokens with one shared secret
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, writer_id: Uuid) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            writer_id,
            iss: TOKEN_ISSUER.to_string(),
            aud: TOKEN_AUDIENCE.to_string(),
            iat: now,
            exp: now.saturating_add(ttl),
        };
        self.encode_claims(&claims)
    }

    pub(crate) fn encode_claims(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_audience(&[TOKEN_AUDIENCE]);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(b"test-secret-with-enough-entropy", DEFAULT_TOKEN_TTL)
    }

    #[test]
    fn test_issue_and_verify() {
        let writer_id = Uuid::new_v4();
        let token = service().issue(writer_id).unwrap();
        let claims = service().verify(&token).unwrap();

        assert_eq!(claims.writer_id, writer_id);
        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.aud, TOKEN_AUDIENCE);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_expired_token() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            writer_id: Uuid::new_v4(),
            iss: TOKEN_ISSUER.to_string(),
            aud: TOKEN_AUDIENCE.to_string(),
            iat: now - 3600,
            exp: now - 60,
        };
        let token = service().encode_claims(&claims).unwrap();
        assert!(matches!(service().verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let other = TokenService::new(b"some-other-secret", DEFAULT_TOKEN_TTL);
        let token = other.issue(Uuid::new_v4()).unwrap();
        assert!(matches!(service().verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let token = service().issue(Uuid::new_v4()).unwrap();
        let forged = service().issue(Uuid::new_v4()).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert!(matches!(service().verify(&spliced), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            writer_id: Uuid::new_v4(),
            iss: TOKEN_ISSUER.to_string(),
            aud: "someone-else".to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = service().encode_claims(&claims).unwrap();
        assert!(matches!(service().verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(service().verify("not.a.jwt"), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        assert!(!format!("{:?}", service()).contains("test-secret"));
    }
}
