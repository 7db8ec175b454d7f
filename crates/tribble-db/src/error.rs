//! Error types for the tribble-db crate.
//!
//! Driver errors never leave this crate raw. They are classified into the
//! small set of outcomes the API layer knows how to report.

use thiserror::Error;

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// SQLSTATE for `string_data_right_truncation`.
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";

/// Which store constraint a write tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Another user already holds this identifier.
    DuplicateIdentifier,
    /// A value is wider than its column.
    FieldTooLong,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstraintKind::DuplicateIdentifier => write!(f, "duplicate identifier"),
            ConstraintKind::FieldTooLong => write!(f, "value too long"),
        }
    }
}

/// Repository operation errors.
///
/// # Example
///
/// ```rust
/// use tribble_db::{ConstraintKind, RepoError};
///
/// fn describe(err: &RepoError) -> &'static str {
///     match err {
///         RepoError::NotFound => "no such user",
///         RepoError::Constraint(ConstraintKind::DuplicateIdentifier) => "taken",
///         RepoError::Constraint(ConstraintKind::FieldTooLong) => "too long",
///         RepoError::Timeout => "store too slow",
///         RepoError::Internal(_) => "store failure",
///     }
/// }
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepoError {
    /// No row matched the lookup key.
    #[error("Not found")]
    NotFound,

    /// A write violated a store constraint.
    #[error("Constraint violation: {0}")]
    Constraint(ConstraintKind),

    /// The call did not complete within its time limit.
    #[error("Store call timed out")]
    Timeout,

    /// Any other store failure. The detail is for logs only.
    #[error("Store error: {0}")]
    Internal(String),
}

impl RepoError {
    /// Check if this error means the lookup key matched nothing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepoError::NotFound)
    }

    /// Check if this error is a constraint violation of the given kind.
    #[must_use]
    pub fn is_constraint(&self, kind: ConstraintKind) -> bool {
        matches!(self, RepoError::Constraint(k) if *k == kind)
    }

    /// Check if this error is a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, RepoError::Timeout)
    }
}

/// Map a SQLSTATE code to the constraint it represents, if we recognise it.
#[must_use]
pub fn classify_sqlstate(code: &str) -> Option<ConstraintKind> {
    match code {
        UNIQUE_VIOLATION => Some(ConstraintKind::DuplicateIdentifier),
        STRING_DATA_RIGHT_TRUNCATION => Some(ConstraintKind::FieldTooLong),
        _ => None,
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound,
            sqlx::Error::PoolTimedOut => RepoError::Timeout,
            sqlx::Error::Database(db_err) => {
                match db_err.code().as_deref().and_then(classify_sqlstate) {
                    Some(kind) => RepoError::Constraint(kind),
                    None => RepoError::Internal(db_err.to_string()),
                }
            }
            other => RepoError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_sqlstate() {
        assert_eq!(
            classify_sqlstate("23505"),
            Some(ConstraintKind::DuplicateIdentifier)
        );
        assert_eq!(
            classify_sqlstate("22001"),
            Some(ConstraintKind::FieldTooLong)
        );
        assert_eq!(classify_sqlstate("23503"), None);
        assert_eq!(classify_sqlstate(""), None);
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: RepoError = sqlx::Error::RowNotFound.into();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_pool_timeout_maps_to_timeout() {
        let err: RepoError = sqlx::Error::PoolTimedOut.into();
        assert!(err.is_timeout());
    }

    #[test]
    fn test_other_driver_errors_are_internal() {
        let err: RepoError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, RepoError::Internal(_)));
    }

    #[test]
    fn test_is_constraint_checks_kind() {
        let err = RepoError::Constraint(ConstraintKind::FieldTooLong);
        assert!(err.is_constraint(ConstraintKind::FieldTooLong));
        assert!(!err.is_constraint(ConstraintKind::DuplicateIdentifier));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            RepoError::Constraint(ConstraintKind::FieldTooLong).to_string(),
            "Constraint violation: value too long"
        );
        assert_eq!(RepoError::Timeout.to_string(), "Store call timed out");
    }
}
