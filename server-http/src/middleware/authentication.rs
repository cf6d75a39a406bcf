use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use nodewatch::auth::User;

/// Extract Basic Auth credentials from Authorization header
pub(crate) fn extract_basic_auth(auth_header: &str) -> Option<(String, String)> {
    // Authorization: Basic <base64>
    let parts: Vec<&str> = auth_header.split_whitespace().collect();

    if parts.len() != 2 || parts[0] != "Basic" {
        return None;
    }

    let decoded = STANDARD.decode(parts[1]).ok()?;
    let decoded_str = String::from_utf8(decoded).ok()?;

    // Passwords may contain ':'
    let mut parts = decoded_str.splitn(2, ':');
    let username = parts.next()?.to_string();
    let password = parts.next()?.to_string();

    Some((username, password))
}

/// Extract Bearer token from Authorization header
pub(crate) fn extract_bearer_token(auth_header: &str) -> Option<String> {
    let parts: Vec<&str> = auth_header.split_whitespace().collect();

    if parts.len() != 2 || parts[0] != "Bearer" {
        return None;
    }

    Some(parts[1].to_string())
}

/// Resolve the caller from Basic credentials or a Bearer session token
pub async fn authenticate_header(state: &AppState, auth_header: &str) -> Result<User, ApiError> {
    if let Some(token) = extract_bearer_token(auth_header) {
        return Ok(state.session_store.validate_session(&token).await?);
    }

    let (username, password) = extract_basic_auth(auth_header).ok_or_else(|| {
        ApiError::Unauthorized("Invalid Authorization header format".to_string())
    })?;

    Ok(state.auth_service.authenticate(&username, &password).await?)
}

/// Authentication middleware. Puts the caller's [`User`] into request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let user = authenticate_header(&state, auth_header).await?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
