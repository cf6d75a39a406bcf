use crate::error::ApiError;
use axum::{extract::Request, middleware::Next, response::Response};
use nodewatch::access;
use nodewatch::auth::User;

/// Admin-only routes. Runs after [`super::auth_middleware`] has resolved the caller.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<User>()
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

    access::require_admin(user)?;

    Ok(next.run(request).await)
}
