//! The authenticated identity for a single request.
//!
//! Produced by the JWT middleware from a validated access token and handed to
//! downstream handlers as a typed request extension. It lives only as long as
//! the request.

use crate::ids::UserId;
use serde::{Deserialize, Serialize};

/// Authenticated user id and login identifier.
///
/// The identifier is echoed from the token for display only; authorization
/// decisions use `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    pub identifier: String,
}

impl Principal {
    #[must_use]
    pub fn new(id: UserId, identifier: impl Into<String>) -> Self {
        Self {
            id,
            identifier: identifier.into(),
        }
    }

    /// True when this principal owns the given user row.
    #[must_use]
    pub fn owns(&self, id: UserId) -> bool {
        self.id == id
    }
}
