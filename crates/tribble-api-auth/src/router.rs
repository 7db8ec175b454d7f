//! Router for the user and session endpoints.
//!
//! Public:
//! - POST /users (register)
//! - GET /users
//! - GET /users/:id
//! - POST /users/login
//! - POST /users/validate
//! - POST /users/refresh
//!
//! Behind the bearer middleware:
//! - GET /users/me
//! - PUT /users/:id
//! - DELETE /users/:id

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Extension, Router,
};
use tribble_auth::{CredentialStore, TokenIssuer, TokenValidator};
use tribble_db::SessionRepository;

use crate::handlers::{
    delete_user_handler, get_user_handler, list_users_handler, login_handler, me_handler,
    refresh_handler, register_handler, update_user_handler, validate_handler,
};
use crate::middleware::jwt_auth_middleware;
use crate::services::{AuthService, UserService};

/// Shared state for the user and session routes.
#[derive(Clone)]
pub struct AuthState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub validator: Arc<TokenValidator>,
}

impl AuthState {
    /// Wire the services over one repository and one signing secret's
    /// issuer/validator pair.
    #[must_use]
    pub fn new(
        repo: Arc<dyn SessionRepository>,
        issuer: Arc<TokenIssuer>,
        validator: Arc<TokenValidator>,
        credentials: CredentialStore,
    ) -> Self {
        let auth_service = Arc::new(AuthService::new(
            repo.clone(),
            issuer,
            validator.clone(),
            credentials,
        ));
        let user_service = Arc::new(UserService::new(repo));

        Self {
            auth_service,
            user_service,
            validator,
        }
    }
}

/// Build the user and session router.
pub fn users_router(state: AuthState) -> Router {
    let public_routes = Router::new()
        .route("/users", get(list_users_handler).post(register_handler))
        .route("/users/:id", get(get_user_handler))
        .route("/users/login", post(login_handler))
        .route("/users/validate", post(validate_handler))
        .route("/users/refresh", post(refresh_handler));

    let protected_routes = Router::new()
        .route("/users/me", get(me_handler))
        .route(
            "/users/:id",
            put(update_user_handler).delete(delete_user_handler),
        )
        .layer(middleware::from_fn_with_state(
            state.validator.clone(),
            jwt_auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(Extension(state.auth_service))
        .layer(Extension(state.user_service))
}
