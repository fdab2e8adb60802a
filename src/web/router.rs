//! Router configuration for Web API.

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    connect, create_user, disconnect, get_file, get_file_data, get_me, get_stats, get_status,
    health_check, list_files, publish_file, unpublish_file, upload_file, AppState,
};
use super::middleware::create_cors_layer;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let file_routes = Router::new()
        .route("/", post(upload_file).get(list_files))
        .route("/:id", get(get_file))
        .route("/:id/publish", put(publish_file))
        .route("/:id/unpublish", put(unpublish_file))
        .route("/:id/data", get(get_file_data));

    let user_routes = Router::new()
        .route("/", post(create_user))
        .route("/me", get(get_me));

    Router::new()
        .nest("/files", file_routes)
        .nest("/users", user_routes)
        .route("/connect", get(connect))
        .route("/disconnect", get(disconnect))
        .route("/status", get(get_status))
        .route("/stats", get(get_stats))
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}
