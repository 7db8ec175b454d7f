//! In-memory implementation of [`SessionRepository`].
//!
//! Enforces the same uniqueness and column-width rules as the PostgreSQL
//! schema so that constraint handling can be exercised without a database.
//! Optional artificial latency lets tests drive the timeout path.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tribble_core::UserId;

use crate::error::{ConstraintKind, RepoError};
use crate::models::{overlong_field, NewUser, User};
use crate::repository::SessionRepository;
use crate::timeout::{bounded, DEFAULT_CALL_TIMEOUT};

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: HashMap<i64, User>,
}

impl Table {
    fn identifier_taken(&self, identifier: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|u| u.identifier == identifier && Some(u.id) != except)
    }
}

/// A process-local user table.
#[derive(Debug)]
pub struct InMemorySessionRepository {
    table: RwLock<Table>,
    latency: Option<Duration>,
    call_timeout: Duration,
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionRepository {
    /// An empty table with no artificial latency.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::default()),
            latency: None,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Delay every call by `latency` before touching the table.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Bound every call by `call_timeout`.
    #[must_use]
    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    /// Whether the table is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn get_by_id(&self, id: UserId) -> Result<User, RepoError> {
        bounded("get_by_id", self.call_timeout, async {
            self.delay().await;
            let table = self.table.read().await;
            table.rows.get(&id.get()).cloned().ok_or(RepoError::NotFound)
        })
        .await
    }

    async fn get_by_identifier(&self, identifier: &str) -> Result<User, RepoError> {
        bounded("get_by_identifier", self.call_timeout, async {
            self.delay().await;
            let table = self.table.read().await;
            table
                .rows
                .values()
                .find(|u| u.identifier == identifier)
                .cloned()
                .ok_or(RepoError::NotFound)
        })
        .await
    }

    async fn get_by_refresh_token(&self, refresh_token: &str) -> Result<User, RepoError> {
        bounded("get_by_refresh_token", self.call_timeout, async {
            self.delay().await;
            let table = self.table.read().await;
            table
                .rows
                .values()
                .find(|u| u.refresh_token.as_deref() == Some(refresh_token))
                .cloned()
                .ok_or(RepoError::NotFound)
        })
        .await
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        bounded("list", self.call_timeout, async {
            self.delay().await;
            let table = self.table.read().await;
            Ok(table.rows.values().cloned().collect())
        })
        .await
    }

    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        bounded("create", self.call_timeout, async {
            self.delay().await;
            if user.overlong_field().is_some() {
                return Err(RepoError::Constraint(ConstraintKind::FieldTooLong));
            }

            let mut table = self.table.write().await;
            if table.identifier_taken(&user.identifier, None) {
                return Err(RepoError::Constraint(ConstraintKind::DuplicateIdentifier));
            }

            table.next_id += 1;
            let created = User {
                id: table.next_id,
                identifier: user.identifier,
                email: user.email,
                password_hash: user.password_hash,
                token: None,
                refresh_token: None,
                date_joined: user.date_joined,
            };
            table.rows.insert(created.id, created.clone());
            Ok(created)
        })
        .await
    }

    async fn update_profile(
        &self,
        id: UserId,
        identifier: &str,
        email: Option<&str>,
    ) -> Result<User, RepoError> {
        bounded("update_profile", self.call_timeout, async {
            self.delay().await;
            if overlong_field(identifier, email).is_some() {
                return Err(RepoError::Constraint(ConstraintKind::FieldTooLong));
            }

            let mut table = self.table.write().await;
            if !table.rows.contains_key(&id.get()) {
                return Err(RepoError::NotFound);
            }
            if table.identifier_taken(identifier, Some(id.get())) {
                return Err(RepoError::Constraint(ConstraintKind::DuplicateIdentifier));
            }

            let row = table.rows.get_mut(&id.get()).ok_or(RepoError::NotFound)?;
            row.identifier = identifier.to_string();
            row.email = email.map(str::to_string);
            Ok(row.clone())
        })
        .await
    }

    async fn update_tokens(
        &self,
        id: UserId,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<(), RepoError> {
        bounded("update_tokens", self.call_timeout, async {
            self.delay().await;
            let mut table = self.table.write().await;
            let row = table.rows.get_mut(&id.get()).ok_or(RepoError::NotFound)?;
            row.token = Some(access_token.to_string());
            row.refresh_token = Some(refresh_token.to_string());
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: UserId) -> Result<(), RepoError> {
        bounded("delete", self.call_timeout, async {
            self.delay().await;
            let mut table = self.table.write().await;
            table
                .rows
                .remove(&id.get())
                .map(|_| ())
                .ok_or(RepoError::NotFound)
        })
        .await
    }
}
