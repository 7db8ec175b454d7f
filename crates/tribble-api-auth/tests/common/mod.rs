//! Common test utilities for tribble-api-auth integration tests.
//!
//! Builds the real router over the in-memory repository and drives it with
//! `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::{Arc, Once};
use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::util::ServiceExt;
use tribble_api_auth::{users_router, AuthState};
use tribble_auth::{CredentialStore, SigningSecret, TokenIssuer, TokenValidator};
use tribble_db::InMemorySessionRepository;

pub const TEST_SECRET: &str = "integration-test-signing-secret";

static INIT_LOGGING: Once = Once::new();

/// Route `tracing` output to the test harness. Filter with `RUST_LOG`.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

pub struct TestApp {
    pub router: Router,
    pub repo: Arc<InMemorySessionRepository>,
    pub validator: Arc<TokenValidator>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_repo(InMemorySessionRepository::new())
    }

    /// Every repository call sleeps for `latency` first.
    pub fn with_latency(latency: Duration, call_timeout: Duration) -> Self {
        Self::with_repo(
            InMemorySessionRepository::new()
                .with_latency(latency)
                .with_call_timeout(call_timeout),
        )
    }

    fn with_repo(repo: InMemorySessionRepository) -> Self {
        init_test_logging();

        let secret = SigningSecret::new(TEST_SECRET).expect("secret");
        let repo = Arc::new(repo);
        let validator = Arc::new(TokenValidator::new(&secret));
        let state = AuthState::new(
            repo.clone(),
            Arc::new(TokenIssuer::new(&secret)),
            validator.clone(),
            // Small Argon2 parameters keep the suite fast.
            CredentialStore::with_params(4096, 1, 1).expect("argon2 params"),
        );

        Self {
            router: users_router(state),
            repo,
            validator,
        }
    }

    /// Send a request and return the status and JSON body (`Null` if empty).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        bearer: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, json)
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body), None).await
    }

    /// Register and return the new id.
    pub async fn register(&self, identifier: &str, password: &str) -> i64 {
        let (status, body) = self
            .post(
                "/users",
                serde_json::json!({"identifier": identifier, "password": password}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register: {body}");
        body["id"].as_i64().expect("id")
    }

    /// Log in and return `(id, access, refresh)`.
    pub async fn login(&self, identifier: &str, password: &str) -> (i64, String, String) {
        let (status, body) = self
            .post(
                "/users/login",
                serde_json::json!({"identifier": identifier, "password": password}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login: {body}");
        (
            body["id"].as_i64().expect("id"),
            body["token"].as_str().expect("token").to_string(),
            body["refresh_token"]
                .as_str()
                .expect("refresh_token")
                .to_string(),
        )
    }
}
