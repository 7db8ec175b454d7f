//! Error types for credential and token operations.

use crate::claims::TokenKind;
use thiserror::Error;

/// Authentication error types.
///
/// Token validation failures are split by cause so callers can log the
/// category without ever touching the token text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    // Token validation errors
    /// `exp` is at or before the validation instant.
    #[error("Token has expired")]
    Expired,

    /// Signature does not verify against the shared secret.
    #[error("Invalid token signature")]
    BadSignature,

    /// The string cannot be parsed as a token.
    #[error("Malformed token: {0}")]
    Malformed(String),

    /// Token verified but is the wrong kind for this use (refresh vs access).
    #[error("Unexpected token kind, expected {expected}")]
    WrongKind {
        /// The kind the caller asked for
        expected: TokenKind,
    },

    // Issuance errors
    /// Secret is empty or the signing operation failed.
    #[error("Token signing failed: {0}")]
    SigningFailed(String),

    // Password errors
    /// Password hashing failed (RNG or library failure).
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

impl AuthError {
    /// Check if this error indicates an expired token.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        matches!(self, AuthError::Expired)
    }

    /// Check if this error indicates an invalid signature.
    #[must_use]
    pub fn is_bad_signature(&self) -> bool {
        matches!(self, AuthError::BadSignature)
    }

    /// Check if this error came from validating a presented token.
    #[must_use]
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            AuthError::Expired
                | AuthError::BadSignature
                | AuthError::Malformed(_)
                | AuthError::WrongKind { .. }
        )
    }

    /// Short, content-free label suitable for log fields.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            AuthError::Expired => "expired",
            AuthError::BadSignature => "bad_signature",
            AuthError::Malformed(_) => "malformed",
            AuthError::WrongKind { .. } => "wrong_kind",
            AuthError::SigningFailed(_) => "signing_failed",
            AuthError::HashingFailed(_) => "hashing_failed",
        }
    }
}
