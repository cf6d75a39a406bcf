use crate::api::ErrorResponse;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use nodewatch::auth::AuthError;
use thiserror::Error;
use tracing::error;

/// Anything a handler can fail with, mapped onto a small set of status codes
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] shared::Error),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        use shared::Error as E;

        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Service(err) => match err {
                E::Validation(_) => StatusCode::BAD_REQUEST,
                E::InvalidSignature => StatusCode::UNAUTHORIZED,
                E::AccessDenied(_) => StatusCode::FORBIDDEN,
                E::NotFound => StatusCode::NOT_FOUND,
                E::UpstreamStatus { .. }
                | E::UpstreamTransport(_)
                | E::UpstreamPayload(_)
                | E::Storage(_)
                | E::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::InvalidSession => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::UserNotFound => StatusCode::NOT_FOUND,
                AuthError::UserAlreadyExists
                | AuthError::WeakPassword
                | AuthError::InvalidNodeId(_) => StatusCode::BAD_REQUEST,
                AuthError::StorageError(_)
                | AuthError::SerializationError(_)
                | AuthError::PasswordHashError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Credential failures invite the client to retry with Basic auth.
    /// A bad webhook signature is a 401 too, but no credentials would help.
    fn wants_challenge(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized(_)
                | ApiError::Auth(AuthError::InvalidCredentials | AuthError::InvalidSession)
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(error = %self, "Request failed");
            return (
                status,
                Json(ErrorResponse::new("Internal server error")),
            )
                .into_response();
        }

        let body = Json(ErrorResponse::new(self.to_string()));
        if self.wants_challenge() {
            (
                status,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"nodewatch\"")],
                body,
            )
                .into_response()
        } else {
            (status, body).into_response()
        }
    }
}

/// Failures while wiring the server together at startup
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to create data directory: {0}")]
    DataDir(#[from] std::io::Error),

    #[error("auth setup failed: {0}")]
    Auth(#[from] AuthError),

    #[error("service setup failed: {0}")]
    Service(#[from] shared::Error),
}
