//! Value Object Module

pub mod content;
pub mod tags;
pub mod title;
