//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::WriterAppState;
pub use middleware::{AuthGuardState, CurrentWriter, Viewer, optional_auth, require_auth};
pub use router::{auth_router, auth_router_generic, writer_router, writer_router_generic};
