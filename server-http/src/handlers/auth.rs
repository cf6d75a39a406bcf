use crate::api::{LoginRequest, LoginResponse, LogoutResponse};
use crate::error::ApiError;
use crate::middleware::authentication::{extract_basic_auth, extract_bearer_token};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap},
    Json,
};
use tracing::info;

/// Client IP as reported by a fronting proxy
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .or_else(|| {
            headers
                .get("X-Real-IP")
                .and_then(|h| h.to_str().ok())
                .map(|s| s.to_string())
        })
}

/// POST /auth/login
///
/// Accepts either a JSON body `{"username": "...", "password": "..."}` or a
/// Basic Auth header, and returns a bearer token valid for one hour.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (username, password) = match body {
        Ok(Json(login_req)) => (login_req.username, login_req.password),
        Err(_) => headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(extract_basic_auth)
            .ok_or_else(|| {
                ApiError::BadRequest(
                    "Missing credentials. Provide either JSON body or Basic Auth header"
                        .to_string(),
                )
            })?,
    };

    let user = state.auth_service.authenticate(&username, &password).await?;

    let session = state
        .session_store
        .create_session(user, client_ip(&headers))
        .await;

    info!(
        username = %session.user.username,
        expires_at = %session.expires_at_utc(),
        "Session created"
    );

    Ok(Json(LoginResponse {
        token: session.token,
        expires_in: state.session_store.ttl_ms() / 1000,
        username: session.user.username,
    }))
}

/// POST /auth/logout
///
/// Invalidates the session named by `Authorization: Bearer <token>`.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LogoutResponse>, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = extract_bearer_token(auth_header).ok_or_else(|| {
        ApiError::BadRequest(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
    })?;

    if state.session_store.invalidate_session(&token).await {
        Ok(Json(LogoutResponse {
            message: "Session logged out successfully".to_string(),
        }))
    } else {
        Err(shared::Error::NotFound.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Forwarded-For", HeaderValue::from_static("10.0.0.1, 10.0.0.2"));
        headers.insert("X-Real-IP", HeaderValue::from_static("10.0.0.9"));
        assert_eq!(client_ip(&headers).as_deref(), Some("10.0.0.1"));

        headers.remove("X-Forwarded-For");
        assert_eq!(client_ip(&headers).as_deref(), Some("10.0.0.9"));

        assert!(client_ip(&HeaderMap::new()).is_none());
    }
}
