//! Account management: listing, lookup, profile replacement, deletion.

use std::sync::Arc;

use tribble_core::{Principal, UserId};
use tribble_db::{SessionRepository, User};

use crate::error::ApiError;

pub struct UserService {
    repo: Arc<dyn SessionRepository>,
}

impl UserService {
    #[must_use]
    pub fn new(repo: Arc<dyn SessionRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, id: UserId) -> Result<User, ApiError> {
        Ok(self.repo.get_by_id(id).await?)
    }

    /// Replace the caller's identifier and email.
    pub async fn update_profile(
        &self,
        principal: &Principal,
        id: UserId,
        identifier: &str,
        email: Option<&str>,
    ) -> Result<User, ApiError> {
        ensure_owner(principal, id)?;

        let email = email.map(|e| e.trim().to_lowercase());
        let user = self
            .repo
            .update_profile(id, identifier, email.as_deref())
            .await?;

        tracing::info!(user_id = %id, "User profile updated");
        Ok(user)
    }

    /// Delete the caller's account. Its stored tokens stop resolving at once.
    pub async fn delete(&self, principal: &Principal, id: UserId) -> Result<(), ApiError> {
        ensure_owner(principal, id)?;

        self.repo.delete(id).await?;

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}

fn ensure_owner(principal: &Principal, id: UserId) -> Result<(), ApiError> {
    if principal.owns(id) {
        Ok(())
    } else {
        tracing::warn!(
            principal_id = %principal.id,
            target_id = %id,
            "Attempt to modify another user's account"
        );
        Err(ApiError::Forbidden)
    }
}
