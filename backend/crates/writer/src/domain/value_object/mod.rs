//! Value Object Module

pub mod bio;
pub mod email;
pub mod writer_name;
pub mod writer_password;
