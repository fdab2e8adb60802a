//! Authentication handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};

use crate::auth::{authenticate, parse_basic};
use crate::web::dto::TokenResponse;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::{request_token, AuthUser};

/// GET /connect - Exchange Basic credentials for a session token.
pub async fn connect(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let (email, password) = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_basic)
        .ok_or_else(ApiError::unauthorized)?;

    let user = authenticate(&state.db, &email, &password).await?;
    let token = state.sessions.create(&user.object_id()).await?;

    Ok(Json(TokenResponse { token }))
}

/// GET /disconnect - Revoke the caller's session token.
pub async fn disconnect(
    State(state): State<Arc<AppState>>,
    AuthUser(_user_id): AuthUser,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    if let Some(token) = request_token(&headers) {
        state.sessions.revoke(&token).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}
