// Public API
pub mod auth_service;
pub mod defaults;
pub mod error;
pub mod models;
pub mod password;
pub mod repository;
pub mod session;
pub mod session_store;
pub mod sled_repository;
pub mod user_service;

// Re-export commonly used types
pub use auth_service::AuthService;
pub use error::AuthError;
pub use models::{Tier, User};
pub use repository::UserRepository;
pub use session::{format_utc_time, generate_session_token, Session, SessionToken};
pub use session_store::SessionStore;
pub use sled_repository::SledUserRepository;
pub use user_service::UserService;
