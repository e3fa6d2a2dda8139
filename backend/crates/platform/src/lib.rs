//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id)
//! - Bearer token issuing and verification (HS256 JWT)
//! - Rate limiting infrastructure and middleware
//! - Client identification from request headers

pub mod client;
pub mod password;
pub mod rate_limit;
pub mod token;
