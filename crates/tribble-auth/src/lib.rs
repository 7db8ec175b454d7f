//! Credential and token library for tribble.
//!
//! This crate provides:
//! - Argon2id password hashing behind [`CredentialStore`]
//! - HS256 access/refresh token minting with [`TokenIssuer`]
//! - Signature and expiry checking with [`TokenValidator`]
//!
//! Issuer and validator share one [`SigningSecret`], built once at process
//! start and passed in explicitly.
//!
//! # Example
//!
//! ```rust
//! use tribble_auth::{SigningSecret, TokenIssuer, TokenValidator};
//! use tribble_core::{Principal, UserId};
//!
//! let secret = SigningSecret::new("change-me").unwrap();
//! let issuer = TokenIssuer::new(&secret);
//! let validator = TokenValidator::new(&secret);
//!
//! let pair = issuer.issue(&Principal::new(UserId::new(1), "alice")).unwrap();
//! let principal = validator.validate_access(&pair.access).unwrap();
//! assert_eq!(principal.id, UserId::new(1));
//! ```

mod claims;
mod error;
mod jwt;
mod password;

// Re-export public API
pub use claims::{Claims, TokenKind};
pub use error::AuthError;
pub use jwt::{
    SigningSecret, TokenIssuer, TokenPair, TokenValidator, ACCESS_TOKEN_LIFETIME_SECS,
    REFRESH_TOKEN_LIFETIME_SECS,
};
pub use password::{hash_password, verify_password, CredentialStore};
