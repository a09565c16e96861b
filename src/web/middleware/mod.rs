//! Middleware for the HTTP interface.

pub mod auth;
pub mod cors;

pub use auth::{session_context, AuthUser, TOKEN_HEADER};
pub use cors::create_cors_layer;
