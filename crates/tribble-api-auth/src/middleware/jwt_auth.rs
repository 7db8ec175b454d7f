//! Bearer token authentication middleware.
//!
//! Per request:
//! - no `Authorization` header: 401
//! - header present, token not a valid unexpired access token: 403
//! - otherwise the [`Principal`] is inserted into request extensions and the
//!   request continues
//!
//! Validation is purely cryptographic. The repository is never consulted,
//! so a token outlives the deletion of its user until it expires.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tribble_auth::TokenValidator;
use tribble_core::Principal;

use crate::error::ApiError;

/// JWT authentication middleware.
///
/// # Usage
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use tribble_api_auth::middleware::jwt_auth_middleware;
///
/// let router = Router::new()
///     .route("/users/me", get(me_handler))
///     .layer(middleware::from_fn_with_state(validator, jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    State(validator): State<Arc<TokenValidator>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = authenticate(&validator, &request)?;
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

fn authenticate(validator: &TokenValidator, request: &Request) -> Result<Principal, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(ApiError::MissingCredentials)?;

    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::warn!(reason = "bad_header", "Bearer authentication failed");
            ApiError::InvalidToken
        })?;

    validator.validate_access(token).map_err(|e| {
        tracing::warn!(reason = e.category(), "Bearer authentication failed");
        ApiError::InvalidToken
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
        Extension, Router,
    };
    use chrono::{Duration, Utc};
    use tower::util::ServiceExt;
    use tribble_auth::{SigningSecret, TokenIssuer};
    use tribble_core::UserId;

    const SECRET: &str = "middleware-test-secret";

    async fn whoami(Extension(principal): Extension<Principal>) -> String {
        format!("{}:{}", principal.id, principal.identifier)
    }

    fn app() -> Router {
        let secret = SigningSecret::new(SECRET).unwrap();
        let validator = Arc::new(TokenValidator::new(&secret));
        Router::new()
            .route("/protected", get(whoami))
            .layer(middleware::from_fn_with_state(validator, jwt_auth_middleware))
    }

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&SigningSecret::new(SECRET).unwrap())
    }

    fn alice() -> Principal {
        Principal::new(UserId::new(42), "alice")
    }

    async fn call(auth: Option<&str>) -> (StatusCode, String) {
        let mut builder = HttpRequest::builder().uri("/protected");
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        let response = app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_valid_token_attaches_principal() {
        let pair = issuer().issue(&alice()).unwrap();

        let (status, body) = call(Some(&format!("Bearer {}", pair.access))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "42:alice");
    }

    #[tokio::test]
    async fn test_missing_header_is_401() {
        let (status, _) = call(None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token_is_403() {
        let pair = issuer()
            .issue_at(&alice(), Utc::now() - Duration::hours(1))
            .unwrap();

        let (status, _) = call(Some(&format!("Bearer {}", pair.access))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_foreign_signature_is_403() {
        let other = TokenIssuer::new(&SigningSecret::new("some-other-secret").unwrap());
        let pair = other.issue(&alice()).unwrap();

        let (status, _) = call(Some(&format!("Bearer {}", pair.access))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_refresh_token_as_bearer_is_403() {
        let pair = issuer().issue(&alice()).unwrap();

        let (status, _) = call(Some(&format!("Bearer {}", pair.refresh))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_malformed_headers_are_403() {
        let pair = issuer().issue(&alice()).unwrap();

        for value in [
            "Bearer ".to_string(),
            "Bearer not.a.jwt".to_string(),
            format!("Basic {}", pair.access),
            pair.access.clone(),
        ] {
            let (status, _) = call(Some(&value)).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "header {value:?}");
        }
    }
}
