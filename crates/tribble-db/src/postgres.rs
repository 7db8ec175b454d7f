//! PostgreSQL implementation of [`SessionRepository`].

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use tribble_core::UserId;

use crate::error::RepoError;
use crate::models::{NewUser, User};
use crate::repository::SessionRepository;
use crate::timeout::{bounded, DEFAULT_CALL_TIMEOUT};

const USER_COLUMNS: &str =
    "id, identifier, email, password_hash, token, refresh_token, date_joined";

/// Repository backed by a pooled PostgreSQL connection.
///
/// Holds no state beyond the pool, so concurrent handlers never contend on
/// anything inside the process. Ordering of concurrent writes is whatever
/// the database gives.
#[derive(Debug, Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
    call_timeout: Duration,
}

impl PgSessionRepository {
    /// Wrap a pool, bounding each call by `call_timeout`.
    #[must_use]
    pub fn new(pool: PgPool, call_timeout: Duration) -> Self {
        Self { pool, call_timeout }
    }

    /// Wrap a pool with the default per-call timeout.
    #[must_use]
    pub fn with_default_timeout(pool: PgPool) -> Self {
        Self::new(pool, DEFAULT_CALL_TIMEOUT)
    }

    async fn fetch_user(&self, op: &'static str, sql: &str, key: Key<'_>) -> Result<User, RepoError> {
        bounded(op, self.call_timeout, async {
            let query = sqlx::query_as::<_, User>(sql);
            let query = match key {
                Key::Id(id) => query.bind(id),
                Key::Text(text) => query.bind(text),
            };
            query
                .fetch_optional(&self.pool)
                .await?
                .ok_or(RepoError::NotFound)
        })
        .await
    }
}

enum Key<'a> {
    Id(i64),
    Text(&'a str),
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn get_by_id(&self, id: UserId) -> Result<User, RepoError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        self.fetch_user("get_by_id", &sql, Key::Id(id.get())).await
    }

    async fn get_by_identifier(&self, identifier: &str) -> Result<User, RepoError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE identifier = $1");
        self.fetch_user("get_by_identifier", &sql, Key::Text(identifier))
            .await
    }

    async fn get_by_refresh_token(&self, refresh_token: &str) -> Result<User, RepoError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE refresh_token = $1");
        self.fetch_user("get_by_refresh_token", &sql, Key::Text(refresh_token))
            .await
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users");
        bounded("list", self.call_timeout, async {
            Ok(sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?)
        })
        .await
    }

    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let sql = format!(
            "INSERT INTO users (identifier, email, password_hash, date_joined) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        );
        let created = bounded("create", self.call_timeout, async {
            Ok(sqlx::query_as::<_, User>(&sql)
                .bind(&user.identifier)
                .bind(&user.email)
                .bind(&user.password_hash)
                .bind(user.date_joined)
                .fetch_one(&self.pool)
                .await?)
        })
        .await?;

        tracing::debug!(user_id = created.id, "User row inserted");
        Ok(created)
    }

    async fn update_profile(
        &self,
        id: UserId,
        identifier: &str,
        email: Option<&str>,
    ) -> Result<User, RepoError> {
        let sql = format!(
            "UPDATE users SET identifier = $2, email = $3 WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        bounded("update_profile", self.call_timeout, async {
            sqlx::query_as::<_, User>(&sql)
                .bind(id.get())
                .bind(identifier)
                .bind(email)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(RepoError::NotFound)
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
            let result =
                sqlx::query("UPDATE users SET token = $2, refresh_token = $3 WHERE id = $1")
                    .bind(id.get())
                    .bind(access_token)
                    .bind(refresh_token)
                    .execute(&self.pool)
                    .await?;

            if result.rows_affected() == 0 {
                return Err(RepoError::NotFound);
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: UserId) -> Result<(), RepoError> {
        bounded("delete", self.call_timeout, async {
            let result = sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(id.get())
                .execute(&self.pool)
                .await?;

            if result.rows_affected() == 0 {
                return Err(RepoError::NotFound);
            }
            Ok(())
        })
        .await
    }
}
