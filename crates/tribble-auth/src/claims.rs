//! Signed token payloads.
//!
//! Access tokens carry the principal (`uid`, `identifier`); refresh tokens
//! carry none and only act as a lookup key for the session store. Every token
//! gets a random `jti`, so two pairs minted within the same second differ.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use tribble_core::{Principal, UserId};
use uuid::Uuid;

/// Which half of a pair a token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Token claims.
///
/// - `uid`: principal id (access tokens only)
/// - `identifier`: login identifier, echoed for display (access tokens only)
/// - `kind`: access or refresh
/// - `iat` / `exp`: issue and expiry, Unix seconds
/// - `jti`: unique token id
///
/// `exp` is fixed at mint time. Extending a session means minting a new pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<UserId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    pub kind: TokenKind,

    pub iat: i64,

    pub exp: i64,

    pub jti: String,
}

impl Claims {
    /// Claims for an access token.
    #[must_use]
    pub fn access(principal: &Principal, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        Self {
            uid: Some(principal.id),
            identifier: Some(principal.identifier.clone()),
            kind: TokenKind::Access,
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Claims for a refresh token. No principal payload.
    #[must_use]
    pub fn refresh(issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        Self {
            uid: None,
            identifier: None,
            kind: TokenKind::Refresh,
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Expired means `exp <= now`.
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }

    /// The principal carried by an access token, if any.
    #[must_use]
    pub fn principal(&self) -> Option<Principal> {
        match (self.uid, &self.identifier) {
            (Some(id), Some(identifier)) => Some(Principal::new(id, identifier.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Principal {
        Principal::new(UserId::new(1), "alice")
    }

    #[test]
    fn test_access_claims_carry_principal() {
        let now = Utc::now();
        let claims = Claims::access(&alice(), now, Duration::minutes(10));

        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.principal(), Some(alice()));
        assert_eq!(claims.exp - claims.iat, 600);
    }

    #[test]
    fn test_refresh_claims_have_no_principal() {
        let claims = Claims::refresh(Utc::now(), Duration::hours(24));

        assert_eq!(claims.kind, TokenKind::Refresh);
        assert!(claims.principal().is_none());
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let claims = Claims::refresh(Utc::now(), Duration::seconds(5));

        assert!(!claims.is_expired_at(claims.exp - 1));
        assert!(claims.is_expired_at(claims.exp));
        assert!(claims.is_expired_at(claims.exp + 1));
    }

    #[test]
    fn test_jti_unique_per_mint() {
        let now = Utc::now();
        let a = Claims::refresh(now, Duration::hours(24));
        let b = Claims::refresh(now, Duration::hours(24));

        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_refresh_serialization_omits_principal_fields() {
        let claims = Claims::refresh(Utc::now(), Duration::hours(24));
        let json = serde_json::to_value(&claims).unwrap();

        assert!(json.get("uid").is_none());
        assert!(json.get("identifier").is_none());
        assert_eq!(json["kind"], "refresh");
    }

    #[test]
    fn test_token_kind_display() {
        assert_eq!(TokenKind::Access.to_string(), "access");
        assert_eq!(TokenKind::Refresh.to_string(), "refresh");
    }
}
