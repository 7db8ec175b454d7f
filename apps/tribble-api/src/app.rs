//! Router assembly: API routes, health, `OpenAPI`, CORS.

use std::time::Duration;

use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderValue, Method};
use axum::{routing::get, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tribble_api_auth::{users_router, AuthState};

use crate::health::health_handler;
use crate::openapi::openapi_handler;

/// Build the full application router.
pub fn build_router(state: AuthState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api-docs/openapi.json", get(openapi_handler))
        .merge(users_router(state))
        .layer(build_cors_layer(cors_origins))
}

/// Build CORS layer from configured origins.
///
/// Explicit origins get credentials support; `*` allows any origin without.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let is_wildcard = origins.iter().any(|o| o == "*");

    let layer = CorsLayer::new().max_age(Duration::from_secs(3600));

    if is_wildcard {
        return layer
            .allow_origin(AllowOrigin::any())
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    layer
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT, ORIGIN])
        .allow_credentials(true)
}
