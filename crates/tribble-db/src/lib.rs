//! Persistence layer for tribble.
//!
//! The rest of the system talks to storage only through the
//! [`SessionRepository`] trait. Two implementations ship here:
//!
//! - [`PgSessionRepository`] - PostgreSQL via a pooled `sqlx` connection
//! - [`InMemorySessionRepository`] - a process-local double for tests
//!
//! Driver errors are translated into [`RepoError`] before they leave this
//! crate, and every call is bounded by a per-call timeout.
//!
//! # Example
//!
//! ```rust,ignore
//! use tribble_db::{PgSessionRepository, SessionRepository, run_migrations};
//!
//! run_migrations(&pool).await?;
//! let repo = PgSessionRepository::new(pool, Duration::from_secs(3));
//! let user = repo.get_by_identifier("alice").await?;
//! ```

pub mod error;
pub mod memory;
pub mod migrations;
pub mod models;
pub mod postgres;
pub mod repository;
mod timeout;

pub use error::{ConstraintKind, RepoError};
pub use memory::InMemorySessionRepository;
pub use migrations::run_migrations;
pub use models::{NewUser, User, EMAIL_MAX_LEN, IDENTIFIER_MAX_LEN};
pub use postgres::PgSessionRepository;
pub use repository::SessionRepository;
pub use timeout::DEFAULT_CALL_TIMEOUT;
