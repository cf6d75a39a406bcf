use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session expired or unknown")]
    InvalidSession,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Password does not meet strength requirements")]
    WeakPassword,

    #[error("Invalid node id: {0}")]
    InvalidNodeId(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Password hashing error: {0}")]
    PasswordHashError(String),
}

impl From<sled::Error> for AuthError {
    fn from(err: sled::Error) -> Self {
        AuthError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        AuthError::SerializationError(err.to_string())
    }
}
