//! Authentication service: registration, login, refresh-token validation
//! and rotation.

use std::sync::Arc;

use chrono::Utc;
use tribble_auth::{CredentialStore, TokenIssuer, TokenPair, TokenValidator};
use tribble_core::UserId;
use tribble_db::{NewUser, SessionRepository, User};

use crate::error::ApiError;

/// Token lifecycle on top of a [`SessionRepository`].
pub struct AuthService {
    repo: Arc<dyn SessionRepository>,
    issuer: Arc<TokenIssuer>,
    validator: Arc<TokenValidator>,
    credentials: CredentialStore,
}

impl AuthService {
    #[must_use]
    pub fn new(
        repo: Arc<dyn SessionRepository>,
        issuer: Arc<TokenIssuer>,
        validator: Arc<TokenValidator>,
        credentials: CredentialStore,
    ) -> Self {
        Self {
            repo,
            issuer,
            validator,
            credentials,
        }
    }

    /// Create an account and give it its first token pair.
    ///
    /// The pair is minted after the insert so it carries the assigned id. If
    /// the pair cannot be stored the row is removed again, so a failed
    /// registration leaves the identifier free for a retry.
    pub async fn register(
        &self,
        identifier: &str,
        email: Option<&str>,
        password: &str,
    ) -> Result<UserId, ApiError> {
        let password_hash = self.credentials.hash(password)?;

        let user = self
            .repo
            .create(NewUser {
                identifier: identifier.to_string(),
                email: email.map(normalize_email),
                password_hash,
                date_joined: Utc::now(),
            })
            .await?;

        if let Err(e) = self.rotate(&user).await {
            match self.repo.delete(user.user_id()).await {
                Ok(()) => tracing::warn!(
                    user_id = user.id,
                    error = %e,
                    "Registration rolled back: first token pair not stored"
                ),
                Err(cleanup) => tracing::error!(
                    user_id = user.id,
                    error = %e,
                    cleanup_error = %cleanup,
                    "Registration left a user without tokens"
                ),
            }
            return Err(e);
        }

        tracing::info!(user_id = user.id, "User registered");
        Ok(user.user_id())
    }

    /// Check credentials and issue a fresh pair.
    ///
    /// An unknown identifier is `NotFound`; a wrong password is
    /// `InvalidPassword`. Neither is logged above debug.
    pub async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<(UserId, TokenPair), ApiError> {
        let user = self.repo.get_by_identifier(identifier).await.map_err(|e| {
            if e.is_not_found() {
                tracing::debug!("Login attempt for unknown identifier");
            }
            ApiError::from(e)
        })?;

        if !self.credentials.verify(&user.password_hash, password) {
            tracing::debug!(user_id = user.id, "Login attempt with wrong password");
            return Err(ApiError::InvalidPassword);
        }

        let pair = self.rotate(&user).await?;

        tracing::info!(user_id = user.id, "User logged in");
        Ok((user.user_id(), pair))
    }

    /// Check that a refresh token is live: valid on its own and still the
    /// one stored for some user.
    pub async fn validate(&self, refresh_token: &str) -> Result<(), ApiError> {
        self.resolve(refresh_token).await.map(|_| ())
    }

    /// Exchange a live refresh token for a new pair.
    ///
    /// Two concurrent calls with the same token both succeed; whichever
    /// pair is stored last wins and the other pair stops resolving.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        let user = self.resolve(refresh_token).await?;
        let pair = self.rotate(&user).await?;

        tracing::info!(user_id = user.id, "Tokens refreshed");
        Ok(pair)
    }

    async fn resolve(&self, refresh_token: &str) -> Result<User, ApiError> {
        if let Err(e) = self.validator.validate_refresh(refresh_token) {
            tracing::debug!(reason = e.category(), "Refresh token rejected");
            return Err(ApiError::NotFound);
        }

        Ok(self.repo.get_by_refresh_token(refresh_token).await?)
    }

    async fn rotate(&self, user: &User) -> Result<TokenPair, ApiError> {
        let pair = self.issuer.issue(&user.principal())?;
        self.repo
            .update_tokens(user.user_id(), &pair.access, &pair.refresh)
            .await?;
        Ok(pair)
    }
}

/// Normalize an email address (trim and lowercase).
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tribble_auth::SigningSecret;
    use tribble_db::{InMemorySessionRepository, RepoError};

    /// In-memory store whose token writes can be switched to time out.
    struct FlakyTokenStore {
        inner: InMemorySessionRepository,
        fail_tokens: AtomicBool,
    }

    #[async_trait]
    impl SessionRepository for FlakyTokenStore {
        async fn get_by_id(&self, id: UserId) -> Result<User, RepoError> {
            self.inner.get_by_id(id).await
        }

        async fn get_by_identifier(&self, identifier: &str) -> Result<User, RepoError> {
            self.inner.get_by_identifier(identifier).await
        }

        async fn get_by_refresh_token(&self, refresh_token: &str) -> Result<User, RepoError> {
            self.inner.get_by_refresh_token(refresh_token).await
        }

        async fn list(&self) -> Result<Vec<User>, RepoError> {
            self.inner.list().await
        }

        async fn create(&self, user: NewUser) -> Result<User, RepoError> {
            self.inner.create(user).await
        }

        async fn update_profile(
            &self,
            id: UserId,
            identifier: &str,
            email: Option<&str>,
        ) -> Result<User, RepoError> {
            self.inner.update_profile(id, identifier, email).await
        }

        async fn update_tokens(
            &self,
            id: UserId,
            access_token: &str,
            refresh_token: &str,
        ) -> Result<(), RepoError> {
            if self.fail_tokens.load(Ordering::SeqCst) {
                return Err(RepoError::Timeout);
            }
            self.inner.update_tokens(id, access_token, refresh_token).await
        }

        async fn delete(&self, id: UserId) -> Result<(), RepoError> {
            self.inner.delete(id).await
        }
    }

    fn service() -> (AuthService, Arc<InMemorySessionRepository>, Arc<TokenValidator>) {
        let secret = SigningSecret::new("unit-test-secret").unwrap();
        let repo = Arc::new(InMemorySessionRepository::new());
        let validator = Arc::new(TokenValidator::new(&secret));
        let service = AuthService::new(
            repo.clone(),
            Arc::new(TokenIssuer::new(&secret)),
            validator.clone(),
            CredentialStore::with_params(4096, 1, 1).unwrap(),
        );
        (service, repo, validator)
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
    }

    #[tokio::test]
    async fn test_register_stores_hash_and_first_pair() {
        let (service, repo, validator) = service();

        let id = service
            .register("alice", Some("Alice@Example.com"), "secret123")
            .await
            .unwrap();

        let user = repo.get_by_id(id).await.unwrap();
        assert_ne!(user.password_hash, "secret123");
        assert!(user.password_hash.starts_with("$argon2id$"));
        assert_eq!(user.email.as_deref(), Some("alice@example.com"));

        let access = user.token.unwrap();
        assert_eq!(validator.validate_access(&access).unwrap().id, id);
        assert!(user.refresh_token.is_some());
    }

    #[tokio::test]
    async fn test_login_unknown_identifier_is_not_found() {
        let (service, _, _) = service();
        let err = service.login("nobody", "secret123").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (service, _, _) = service();
        service.register("alice", None, "secret123").await.unwrap();

        let err = service.login("alice", "wrongpass").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidPassword));
    }

    #[tokio::test]
    async fn test_login_overwrites_stored_pair() {
        let (service, repo, _) = service();
        let id = service.register("alice", None, "secret123").await.unwrap();
        let before = repo.get_by_id(id).await.unwrap();

        let (login_id, pair) = service.login("alice", "secret123").await.unwrap();
        let after = repo.get_by_id(id).await.unwrap();

        assert_eq!(login_id, id);
        assert_eq!(after.token.as_deref(), Some(pair.access.as_str()));
        assert_eq!(after.refresh_token.as_deref(), Some(pair.refresh.as_str()));
        assert_ne!(before.refresh_token, after.refresh_token);
    }

    #[tokio::test]
    async fn test_refresh_rotates_and_retires_old_token() {
        let (service, _, _) = service();
        service.register("alice", None, "secret123").await.unwrap();
        let (_, first) = service.login("alice", "secret123").await.unwrap();

        let second = service.refresh(&first.refresh).await.unwrap();
        assert_ne!(second.access, first.access);

        assert!(service.validate(&second.refresh).await.is_ok());
        assert!(matches!(
            service.validate(&first.refresh).await,
            Err(ApiError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_access_token_is_not_a_refresh_token() {
        let (service, _, _) = service();
        service.register("alice", None, "secret123").await.unwrap();
        let (_, pair) = service.login("alice", "secret123").await.unwrap();

        assert!(matches!(
            service.refresh(&pair.access).await,
            Err(ApiError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_garbage_refresh_token_is_not_found() {
        let (service, _, _) = service();
        assert!(matches!(
            service.validate("not-a-token").await,
            Err(ApiError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_register_rolls_back_when_first_pair_cannot_be_stored() {
        let secret = SigningSecret::new("unit-test-secret").unwrap();
        let repo = Arc::new(FlakyTokenStore {
            inner: InMemorySessionRepository::new(),
            fail_tokens: AtomicBool::new(true),
        });
        let service = AuthService::new(
            repo.clone(),
            Arc::new(TokenIssuer::new(&secret)),
            Arc::new(TokenValidator::new(&secret)),
            CredentialStore::with_params(4096, 1, 1).unwrap(),
        );

        let err = service
            .register("alice", None, "secret123")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Timeout));
        assert!(repo.inner.is_empty().await);

        repo.fail_tokens.store(false, Ordering::SeqCst);
        let id = service.register("alice", None, "secret123").await.unwrap();

        let user = repo.get_by_id(id).await.unwrap();
        assert!(user.token.is_some());
        assert!(user.refresh_token.is_some());
        assert_eq!(repo.inner.len().await, 1);
    }
}
