//! Web API module.
//!
//! This module provides the REST API: file hierarchy routes, account and
//! session routes, and service status.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
