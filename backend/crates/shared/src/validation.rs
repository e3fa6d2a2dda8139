//! Field validation
//!
//! Request validation collects every failing field before responding, so a
//! caller gets `errors: [{field, message, value}]` for the whole payload.

use serde::Serialize;
use serde_json::Value;

use crate::error::app_error::{AppError, AppResult};

/// One failing request field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value,
        }
    }
}

/// Accumulates field failures across several checks
///
/// ```rust
/// use kernel::validation::Validator;
/// use kernel::error::app_error::AppError;
///
/// let mut v = Validator::new();
/// let a: Option<u32> = v.check(Ok(1));
/// let b: Option<u32> = v.check(Err(AppError::invalid_field("b", "bad", "x")));
/// assert_eq!(a, Some(1));
/// assert!(b.is_none());
/// assert_eq!(v.into_error().field_errors().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the value on success, record the field errors otherwise.
    ///
    /// Non-validation errors are recorded under their message with an
    /// empty field name.
    pub fn check<T>(&mut self, result: AppResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                if err.field_errors().is_empty() {
                    let message = err.message().to_string();
                    self.errors.push(FieldError::new("", message, None));
                } else {
                    self.errors.extend(err.into_field_errors());
                }
                None
            }
        }
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>, value: Option<Value>) {
        self.errors.push(FieldError::new(field, message, value));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_error(self) -> AppError {
        AppError::validation(self.errors)
    }

    /// `Ok(())` when nothing failed
    pub fn finish(self) -> AppResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}

/// Validate an absolute http(s) URL
pub fn web_url(field: &str, raw: &str) -> AppResult<String> {
    let trimmed = raw.trim();
    let valid = trimmed
        .parse::<http::Uri>()
        .ok()
        .filter(|uri| matches!(uri.scheme_str(), Some("http") | Some("https")))
        .and_then(|uri| uri.host().map(|host| host.contains('.') || host == "localhost"))
        .unwrap_or(false);

    if valid {
        Ok(trimmed.to_string())
    } else {
        Err(AppError::invalid_field(
            field,
            format!("{} must be a valid URL", field),
            raw,
        ))
    }
}

/// Validate an optional URL where an empty string clears the value
pub fn optional_web_url(field: &str, raw: Option<&str>) -> AppResult<Option<String>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => web_url(field, value).map(Some),
    }
}

/// Optional boolean body field
///
/// Accepts JSON booleans and the strings `"true"`/`"false"`/`"1"`/`"0"`;
/// absent or `null` is `None`.
pub fn optional_flag(field: &str, raw: Option<&Value>, message: &str) -> AppResult<Option<bool>> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(Value::String(s)) if matches!(s.as_str(), "true" | "1") => Ok(Some(true)),
        Some(Value::String(s)) if matches!(s.as_str(), "false" | "0") => Ok(Some(false)),
        Some(other) => Err(AppError::invalid_field(field, message, other.clone())),
    }
}

/// Boolean body field that must be present
pub fn required_flag(field: &str, raw: Option<&Value>, message: &str) -> AppResult<bool> {
    optional_flag(field, raw, message)?
        .ok_or_else(|| AppError::validation(vec![FieldError::new(field, message, None)]))
}

/// Character-count bounds check on a trimmed string
pub fn length_between(
    field: &str,
    raw: &str,
    min: usize,
    max: usize,
    message: &str,
) -> AppResult<String> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len < min || len > max {
        return Err(AppError::invalid_field(field, message, raw));
    }
    Ok(trimmed.to_string())
}
