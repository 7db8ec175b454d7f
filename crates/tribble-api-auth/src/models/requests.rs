//! Request DTOs for the user and session endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Registration request payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Login identifier (username or email).
    #[validate(length(min = 3, max = 64, message = "Identifier must be 3-64 characters"))]
    pub identifier: String,

    /// Optional contact email.
    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 255, message = "Email too long"))]
    #[serde(default)]
    pub email: Option<String>,

    /// User password.
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Login request payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Login identifier.
    #[validate(length(min = 1, max = 64, message = "Identifier must be 1-64 characters"))]
    pub identifier: String,

    /// User password.
    /// Bounded so oversized inputs never reach the hasher.
    #[validate(length(min = 1, max = 1024, message = "Password must be 1-1024 characters"))]
    pub password: String,
}

/// Refresh and validate request payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RefreshRequest {
    /// Refresh token from the login or refresh response.
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}

/// Profile update payload. Both fields are replaced as given.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New login identifier.
    #[validate(length(min = 3, max = 64, message = "Identifier must be 3-64 characters"))]
    pub identifier: String,

    /// New contact email. Omitting it clears the stored email.
    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 255, message = "Email too long"))]
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_valid() {
        let req = RegisterRequest {
            identifier: "alice".to_string(),
            email: Some("alice@example.com".to_string()),
            password: "secret123".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_request_short_password() {
        let req = RegisterRequest {
            identifier: "alice".to_string(),
            email: None,
            password: "short".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_bad_email() {
        let req = RegisterRequest {
            identifier: "alice".to_string(),
            email: Some("not-an-email".to_string()),
            password: "secret123".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_identifier_bounds() {
        let mut req = RegisterRequest {
            identifier: "ab".to_string(),
            email: None,
            password: "secret123".to_string(),
        };
        assert!(req.validate().is_err());

        req.identifier = "a".repeat(65);
        assert!(req.validate().is_err());

        req.identifier = "a".repeat(64);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_login_request_rejects_empty_password() {
        let req = LoginRequest {
            identifier: "alice".to_string(),
            password: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_login_request_rejects_oversized_password() {
        let req = LoginRequest {
            identifier: "alice".to_string(),
            password: "a".repeat(1025),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_refresh_request_requires_token() {
        let req = RefreshRequest {
            refresh_token: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_email_is_optional_in_json() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"identifier":"alice","password":"secret123"}"#).unwrap();
        assert_eq!(req.email, None);
        assert!(req.validate().is_ok());
    }
}
