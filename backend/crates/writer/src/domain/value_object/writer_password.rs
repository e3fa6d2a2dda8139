//! Writer Password Value Object
//!
//! Delegates to `platform::password` for cryptographic operations and turns
//! policy failures into `password` field errors.
//!
//! ## Usage
//! ```rust
//! use writer::domain::value_object::writer_password::{RawPassword, WriterPassword};
//!
//! let raw = RawPassword::new("Secret123".to_string()).unwrap();
//! let hashed = WriterPassword::from_raw(&raw, None).unwrap();
//! assert!(hashed.verify(&raw, None));
//! ```

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Password for signup; enforces the full policy
    pub fn new(raw: String) -> AppResult<Self> {
        ClearTextPassword::new(raw).map(Self).map_err(policy_error)
    }

    /// Password for login; only presence is required
    pub fn for_login(raw: String) -> AppResult<Self> {
        ClearTextPassword::for_verification(raw)
            .map(Self)
            .map_err(policy_error)
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

fn policy_error(err: PasswordPolicyError) -> AppError {
    // The rejected value is never echoed back.
    AppError::validation(vec![kernel::validation::FieldError::new(
        "password",
        err.to_string(),
        None,
    )])
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Writer Password (Hashed, for storage)
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct WriterPassword(HashedPassword);

impl WriterPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        raw.inner()
            .hash(pepper)
            .map(Self)
            .map_err(|e| AppError::internal("Password hashing failed").with_source(e))
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|e| AppError::internal("Invalid password hash in database").with_source(e))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time verification
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for WriterPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_errors_are_field_errors() {
        let err = RawPassword::new("lowercase1".to_string()).unwrap_err();
        assert_eq!(err.status_code(), 400);
        let field = &err.field_errors()[0];
        assert_eq!(field.field, "password");
        assert!(field.value.is_none());
    }

    #[test]
    fn test_login_password_only_needs_presence() {
        assert!(RawPassword::for_login("x".to_string()).is_ok());
        let err = RawPassword::for_login(String::new()).unwrap_err();
        assert_eq!(err.field_errors()[0].message, "Password is required");
    }
}
