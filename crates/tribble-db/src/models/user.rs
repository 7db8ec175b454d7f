//! User entity model.
//!
//! One row per account, holding the credentials and the single live token
//! pair. Not `Serialize`: API responses are built from it field by field so
//! the password hash and tokens never leave the server by accident.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tribble_core::{Principal, UserId};

/// Width of the `identifier` column.
pub const IDENTIFIER_MAX_LEN: usize = 64;

/// Width of the `email` column.
pub const EMAIL_MAX_LEN: usize = 255;

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    /// Row id, assigned by the store.
    pub id: i64,

    /// Login identifier (username or email), unique across users.
    pub identifier: String,

    /// Optional contact email.
    pub email: Option<String>,

    /// Argon2id PHC hash. Never a raw password.
    pub password_hash: String,

    /// Current access token.
    pub token: Option<String>,

    /// Current refresh token.
    pub refresh_token: Option<String>,

    /// When the account was created.
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// Get the user ID as a typed `UserId`.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::new(self.id)
    }

    /// The principal tokens are minted for.
    #[must_use]
    pub fn principal(&self) -> Principal {
        Principal::new(self.user_id(), self.identifier.clone())
    }
}

/// Insert payload for a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub identifier: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
}

impl NewUser {
    /// First column that exceeds its storage width, if any.
    pub(crate) fn overlong_field(&self) -> Option<&'static str> {
        overlong_field(&self.identifier, self.email.as_deref())
    }
}

pub(crate) fn overlong_field(identifier: &str, email: Option<&str>) -> Option<&'static str> {
    if identifier.chars().count() > IDENTIFIER_MAX_LEN {
        return Some("identifier");
    }
    if email.is_some_and(|e| e.chars().count() > EMAIL_MAX_LEN) {
        return Some("email");
    }
    None
}
