//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary every domain crate agrees on:
//! - Common error types and result aliases
//! - Typed entity IDs (writer, blog, comment)
//! - The list query builder (pagination, sort, search) and its page output
//! - Field validation and the JSON response envelope
//!
//! **Design Principle**: Only include things that have the same meaning
//! across writers, blogs and comments.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod author;
pub mod id;
pub mod query;
pub mod response;
pub mod validation;
