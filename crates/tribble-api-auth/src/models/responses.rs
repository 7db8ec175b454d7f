//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tribble_core::{Principal, UserId};
use tribble_db::User;
use utoipa::ToSchema;

/// Successful login: the user id and a fresh token pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    #[schema(value_type = i64)]
    pub id: UserId,
    /// Access token (expires after 10 minutes).
    pub token: String,
    /// Refresh token (expires after 24 hours).
    pub refresh_token: String,
}

/// Successful refresh: the rotated pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RefreshResponse {
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidateResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    #[schema(value_type = i64)]
    pub id: UserId,
}

/// Public view of a user. Never carries the password hash or tokens.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(value_type = i64)]
    pub id: UserId,
    pub identifier: String,
    pub email: Option<String>,
    pub date_joined: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.user_id(),
            identifier: user.identifier,
            email: user.email,
            date_joined: user.date_joined,
        }
    }
}

/// The authenticated principal, as seen by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    #[schema(value_type = i64)]
    pub id: UserId,
    pub identifier: String,
}

impl From<Principal> for MeResponse {
    fn from(principal: Principal) -> Self {
        Self {
            id: principal.id,
            identifier: principal.identifier,
        }
    }
}
