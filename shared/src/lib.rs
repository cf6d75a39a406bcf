// shared/src/lib.rs

use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("not found")]
    NotFound,
    #[error("upstream responded {status}: {reason}")]
    UpstreamStatus { status: u16, reason: String },
    #[error("upstream unreachable: {0}")]
    UpstreamTransport(String),
    #[error("invalid upstream payload: {0}")]
    UpstreamPayload(String),
    #[error("access denied: {0}")]
    AccessDenied(String),
    #[error("invalid webhook signature")]
    InvalidSignature,
    #[error("validation: {0}")]
    Validation(String),
    #[error("storage: {0}")]
    Storage(String),
    #[error("internal: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtlMs(pub u64);

impl TtlMs {
    pub const fn from_minutes(minutes: u64) -> Self {
        Self(minutes * 60 * 1000)
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(self.0)
    }
}

pub mod clock;
pub mod config;

pub use clock::{Clock, ManualClock, SystemClock};
