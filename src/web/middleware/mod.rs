//! Middleware for Web API.

pub mod auth;
pub mod cors;

pub use auth::{request_token, AuthUser, OptionalAuthUser, TOKEN_HEADER};
pub use cors::create_cors_layer;
