//! Strongly Typed Identifiers
//!
//! User rows are keyed by a numeric id assigned by the store. Wrapping it in
//! a newtype keeps raw integers (row counts, timestamps, ports) from being
//! passed where a user id is expected.
//!
//! # Example
//!
//! ```
//! use tribble_core::UserId;
//!
//! let id: UserId = "42".parse().unwrap();
//! assert_eq!(id, UserId::new(42));
//! assert_eq!(id.to_string(), "42");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Error type for ID parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse
    pub id_type: &'static str,
    /// The underlying integer parse error message
    pub message: String,
}

impl Display for ParseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse {}: {}", self.id_type, self.message)
    }
}

impl std::error::Error for ParseIdError {}

/// Strongly typed identifier for users.
///
/// Immutable once assigned; the store hands it out on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wraps a raw row id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| ParseIdError {
                id_type: "UserId",
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_returns_number() {
        assert_eq!(UserId::new(17).to_string(), "17");
    }

    #[test]
    fn test_parse_round_trips_display() {
        let id = UserId::new(12345);
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = "abc".parse::<UserId>().unwrap_err();
        assert_eq!(err.id_type, "UserId");
        assert!(err.to_string().starts_with("Failed to parse UserId"));
    }

    #[test]
    fn test_serializes_transparently() {
        let json = serde_json::to_string(&UserId::new(9)).unwrap();
        assert_eq!(json, "9");

        let back: UserId = serde_json::from_str("9").unwrap();
        assert_eq!(back, UserId::new(9));
    }

    #[test]
    fn test_i64_conversions() {
        let id: UserId = 5_i64.into();
        let raw: i64 = id.into();
        assert_eq!(raw, 5);
    }
}
