use crate::auth::User;
use shared::{Error, Result};

/// Subscription check for features that are never sold per node
pub fn require_subscription(user: &User) -> Result<()> {
    if user.is_premium() {
        Ok(())
    } else {
        Err(Error::AccessDenied(
            "a premium subscription is required".into(),
        ))
    }
}

/// A node's premium statistics are open to subscribers and to
/// users who bought one-time access to that node
pub fn require_node_access(user: &User, node_id: &str) -> Result<()> {
    if user.is_premium() || user.has_node_grant(node_id) {
        Ok(())
    } else {
        Err(Error::AccessDenied(format!(
            "no premium access to node {node_id}"
        )))
    }
}

/// User management is limited to admins
pub fn require_admin(user: &User) -> Result<()> {
    if user.is_admin {
        Ok(())
    } else {
        Err(Error::AccessDenied("administrator access is required".into()))
    }
}
