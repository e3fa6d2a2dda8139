//! Value Object Module

pub mod comment_content;
