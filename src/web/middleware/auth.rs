//! Token authentication extractors.
//!
//! The token is read from the `X-Token` header, or from
//! `Authorization: Bearer <token>` when that header is absent.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::auth::parse_bearer;
use crate::file::ObjectId;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "x-token";

/// Session token sent with the request, if any.
pub fn request_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        return Some(token.to_string());
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_bearer)
        .map(str::to_string)
}

async fn resolve_user(parts: &Parts, state: &AppState) -> Result<Option<ObjectId>, ApiError> {
    let Some(token) = request_token(&parts.headers) else {
        return Ok(None);
    };
    Ok(state.sessions.resolve(&token).await?)
}

/// Extractor for authenticated users.
///
/// Rejects with 401 `{"error": "Unauthorized"}` when the token is missing,
/// unknown or expired.
#[derive(Debug, Clone)]
pub struct AuthUser(pub ObjectId);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        match resolve_user(parts, state).await? {
            Some(user_id) => Ok(AuthUser(user_id)),
            None => {
                tracing::debug!("Request without a valid session token");
                Err(ApiError::unauthorized())
            }
        }
    }
}

/// Optional authentication extractor.
///
/// Similar to AuthUser but never rejects: a missing or stale token simply
/// yields `None`.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<ObjectId>);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for OptionalAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(resolve_user(parts, state).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for &(name, value) in pairs {
            map.insert(name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_request_token_from_x_token() {
        let p = headers(&[("x-token", "abc")]);
        assert_eq!(request_token(&p), Some("abc".to_string()));
    }

    #[test]
    fn test_request_token_from_bearer() {
        let p = headers(&[("authorization", "Bearer xyz")]);
        assert_eq!(request_token(&p), Some("xyz".to_string()));
    }

    #[test]
    fn test_x_token_takes_precedence() {
        let p = headers(&[("x-token", "abc"), ("authorization", "Bearer xyz")]);
        assert_eq!(request_token(&p), Some("abc".to_string()));
    }

    #[test]
    fn test_no_token() {
        assert_eq!(request_token(&headers(&[])), None);
        assert_eq!(request_token(&headers(&[("x-token", "  ")])), None);
        assert_eq!(
            request_token(&headers(&[("authorization", "Basic abc")])),
            None
        );
    }
}
