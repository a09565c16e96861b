//! HTTP interface for filevault.
//!
//! Login and logout exchange Basic credentials for session tokens; the file
//! routes require a token in the `X-Token` header.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::{create_router, DEFAULT_BODY_LIMIT};
pub use server::WebServer;
