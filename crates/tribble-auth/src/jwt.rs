//! HS256 token issuance and validation.
//!
//! [`TokenIssuer`] and [`TokenValidator`] are built from the same
//! [`SigningSecret`]. The validator checks the signature first and then
//! applies `exp <= now → Expired` itself, with no leeway.

use crate::claims::{Claims, TokenKind};
use crate::error::AuthError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::collections::HashSet;
use tribble_core::Principal;

/// Access token validity in seconds (10 minutes).
pub const ACCESS_TOKEN_LIFETIME_SECS: i64 = 600;

/// Refresh token validity in seconds (24 hours).
pub const REFRESH_TOKEN_LIFETIME_SECS: i64 = 86_400;

/// Symmetric signing secret shared by issuer and validator.
///
/// Never empty. `Debug` output is redacted.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Wrap a secret.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SigningFailed` if the secret is empty.
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, AuthError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(AuthError::SigningFailed(
                "signing secret is empty".to_string(),
            ));
        }
        Ok(Self(secret))
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningSecret([REDACTED])")
    }
}

/// An access/refresh pair as handed to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Mints signed access/refresh pairs.
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_lifetime", &self.access_lifetime)
            .field("refresh_lifetime", &self.refresh_lifetime)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Create an issuer with the standard lifetimes (10 minutes / 24 hours).
    #[must_use]
    pub fn new(secret: &SigningSecret) -> Self {
        Self::with_lifetimes(
            secret,
            Duration::seconds(ACCESS_TOKEN_LIFETIME_SECS),
            Duration::seconds(REFRESH_TOKEN_LIFETIME_SECS),
        )
    }

    /// Create an issuer with custom lifetimes.
    #[must_use]
    pub fn with_lifetimes(
        secret: &SigningSecret,
        access_lifetime: Duration,
        refresh_lifetime: Duration,
    ) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
            access_lifetime,
            refresh_lifetime,
        }
    }

    /// Mint a pair for `principal`, issued now.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SigningFailed` if signing fails.
    pub fn issue(&self, principal: &Principal) -> Result<TokenPair, AuthError> {
        self.issue_at(principal, Utc::now())
    }

    /// Mint a pair as if issued at `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SigningFailed` if signing fails.
    pub fn issue_at(
        &self,
        principal: &Principal,
        issued_at: DateTime<Utc>,
    ) -> Result<TokenPair, AuthError> {
        let access = self.sign(&Claims::access(principal, issued_at, self.access_lifetime))?;
        let refresh = self.sign(&Claims::refresh(issued_at, self.refresh_lifetime))?;

        Ok(TokenPair { access, refresh })
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.key).map_err(|e| {
            tracing::error!(kind = %claims.kind, "Failed to sign token: {}", e);
            AuthError::SigningFailed(e.to_string())
        })
    }
}

/// Verifies signature and expiry of presented tokens.
#[derive(Clone)]
pub struct TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator").finish_non_exhaustive()
    }
}

impl TokenValidator {
    #[must_use]
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Only HS256
        validation.algorithms = vec![Algorithm::HS256];
        // Expiry is checked by hand below: the library treats exp == now as valid.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::from(["exp".to_string()]);

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Parse and verify a token against the current wall clock.
    ///
    /// # Errors
    ///
    /// - `AuthError::Malformed` - not parseable as a token
    /// - `AuthError::BadSignature` - signature does not verify
    /// - `AuthError::Expired` - `exp <= now`
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Parse and verify a token against `now` (Unix seconds).
    pub fn validate_at(&self, token: &str, now: i64) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(map_jwt_error)?
            .claims;

        if claims.is_expired_at(now) {
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }

    /// Validate an access token and return its principal.
    ///
    /// Refresh tokens, or access tokens lacking a principal, are rejected.
    pub fn validate_access(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = self.validate(token)?;
        if claims.kind != TokenKind::Access {
            return Err(AuthError::WrongKind {
                expected: TokenKind::Access,
            });
        }

        claims
            .principal()
            .ok_or_else(|| AuthError::Malformed("access token without principal".to_string()))
    }

    /// Validate a refresh token.
    pub fn validate_refresh(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.validate(token)?;
        if claims.kind != TokenKind::Refresh {
            return Err(AuthError::WrongKind {
                expected: TokenKind::Refresh,
            });
        }
        Ok(claims)
    }
}

/// Map jsonwebtoken errors to AuthError.
fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::BadSignature,
        ErrorKind::InvalidToken => AuthError::Malformed("Malformed token".to_string()),
        ErrorKind::Base64(_) => AuthError::Malformed("Invalid base64 encoding".to_string()),
        ErrorKind::Json(_) => AuthError::Malformed("Invalid JSON in claims".to_string()),
        ErrorKind::Utf8(_) => AuthError::Malformed("Invalid UTF-8 in token".to_string()),
        ErrorKind::MissingRequiredClaim(claim) => {
            AuthError::Malformed(format!("Missing required claim: {claim}"))
        }
        _ => AuthError::Malformed(format!("Token validation failed: {err}")),
    }
}
