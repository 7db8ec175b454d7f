//! The storage seam.
//!
//! Every component that needs user or session data goes through
//! [`SessionRepository`]. Implementations must be safe to share across
//! concurrently running request handlers.

use async_trait::async_trait;
use tribble_core::UserId;

use crate::error::RepoError;
use crate::models::{NewUser, User};

/// User and session persistence.
///
/// Lookups fail with [`RepoError::NotFound`] when nothing matches. Writes
/// report store constraint violations as [`RepoError::Constraint`]. Every
/// call is bounded in time and fails with [`RepoError::Timeout`] past it.
///
/// Beyond the session operations (`get_by_*`, `update_tokens`) the trait
/// carries the account operations behind the user routes (`list`, `create`,
/// `update_profile`, `delete`). Add methods here only together with both
/// implementations.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Look up a user by id.
    async fn get_by_id(&self, id: UserId) -> Result<User, RepoError>;

    /// Look up a user by login identifier (exact match).
    async fn get_by_identifier(&self, identifier: &str) -> Result<User, RepoError>;

    /// Look up the user whose current refresh token is `refresh_token`.
    async fn get_by_refresh_token(&self, refresh_token: &str) -> Result<User, RepoError>;

    /// All users, in no particular order.
    async fn list(&self) -> Result<Vec<User>, RepoError>;

    /// Insert a new user and return it with its assigned id.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    /// Replace a user's identifier and email.
    async fn update_profile(
        &self,
        id: UserId,
        identifier: &str,
        email: Option<&str>,
    ) -> Result<User, RepoError>;

    /// Overwrite the user's stored token pair.
    ///
    /// Last write wins: two concurrent calls for the same user both succeed
    /// and the pair written second is the one kept.
    async fn update_tokens(
        &self,
        id: UserId,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<(), RepoError>;

    /// Remove a user.
    async fn delete(&self, id: UserId) -> Result<(), RepoError>;
}
