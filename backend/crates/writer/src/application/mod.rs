//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod manage_writer;
pub mod sign_in;
pub mod sign_up;
pub mod writer_profile;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use config::AuthConfig;
pub use manage_writer::{ManageWriterUseCase, SocialLinksInput, UpdateWriterInput};
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_up::{AuthOutput, SignUpInput, SignUpUseCase};
pub use writer_profile::WriterProfileUseCase;
