//! Error types for the tribble HTTP API.
//!
//! Every failure leaving a handler is an [`ApiError`], rendered as an
//! RFC 7807 problem document. Internal detail is logged, never echoed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tribble_auth::AuthError;
use tribble_db::{ConstraintKind, RepoError};
use utoipa::ToSchema;

/// Error type for the tribble API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed body or a field failing validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The addressed user (or refresh token) does not resolve.
    #[error("Not found")]
    NotFound,

    /// Known identifier, wrong password.
    #[error("invalid password")]
    InvalidPassword,

    /// No `Authorization` header on a protected route.
    #[error("Missing credentials")]
    MissingCredentials,

    /// Bearer token present but not a valid, unexpired access token.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Authenticated, but acting on another user's account.
    #[error("Forbidden")]
    Forbidden,

    /// A write tripped a store constraint.
    #[error("Constraint violation: {0}")]
    Constraint(ConstraintKind),

    /// The store did not answer in time.
    #[error("Store timeout")]
    Timeout,

    /// Anything else.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidPassword | ApiError::Constraint(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MissingCredentials => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken | ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn slug_and_title(&self) -> (&'static str, &'static str) {
        match self {
            ApiError::Validation(_) => ("validation-error", "Validation Error"),
            ApiError::NotFound => ("not-found", "Not Found"),
            ApiError::InvalidPassword => ("invalid-password", "Invalid Password"),
            ApiError::MissingCredentials => ("unauthorized", "Unauthorized"),
            ApiError::InvalidToken => ("invalid-token", "Invalid Token"),
            ApiError::Forbidden => ("forbidden", "Forbidden"),
            ApiError::Constraint(ConstraintKind::DuplicateIdentifier) => {
                ("duplicate-identifier", "Duplicate Identifier")
            }
            ApiError::Constraint(ConstraintKind::FieldTooLong) => {
                ("field-too-long", "Field Too Long")
            }
            ApiError::Timeout => ("timeout", "Service Unavailable"),
            ApiError::Internal(_) => ("internal-error", "Internal Server Error"),
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::NotFound => "not found".to_string(),
            ApiError::InvalidPassword => "invalid password".to_string(),
            ApiError::MissingCredentials => "authorization header required".to_string(),
            ApiError::InvalidToken => "invalid or expired token".to_string(),
            ApiError::Forbidden => "cannot act on another user's account".to_string(),
            ApiError::Constraint(ConstraintKind::DuplicateIdentifier) => {
                "identifier already taken".to_string()
            }
            ApiError::Constraint(ConstraintKind::FieldTooLong) => "value too long".to_string(),
            ApiError::Timeout => "the store did not respond in time".to_string(),
            ApiError::Internal(_) => "an internal error occurred".to_string(),
        }
    }
}

/// RFC 7807 Problem Details response format.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<&ApiError> for ProblemDetails {
    fn from(err: &ApiError) -> Self {
        let (slug, title) = err.slug_and_title();
        Self {
            problem_type: format!("urn:tribble:problem:{slug}"),
            title: title.to_string(),
            status: err.status().as_u16(),
            detail: Some(err.detail()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
            }
            ApiError::Timeout => {
                tracing::warn!("Store call timed out");
            }
            _ => {}
        }

        let status = self.status();
        (status, Json(ProblemDetails::from(&self))).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => ApiError::NotFound,
            RepoError::Constraint(kind) => ApiError::Constraint(kind),
            RepoError::Timeout => ApiError::Timeout,
            RepoError::Internal(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        if err.is_token_error() {
            ApiError::InvalidToken
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        messages.sort();
        ApiError::Validation(messages.join(", "))
    }
}
