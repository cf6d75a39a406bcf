//! Lightning network statistics backend: memoized access to the upstream
//! statistics service, premium access rules, user accounts and payment
//! webhooks.

pub mod access;
pub mod auth;
pub mod ports;
pub mod stats;
pub mod upstream;
pub mod webhook;
