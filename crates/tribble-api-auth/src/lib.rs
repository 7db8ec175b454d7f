//! HTTP API for tribble.
//!
//! Login, token refresh and validation, user accounts, and the bearer-token
//! middleware that guards the protected routes.
//!
//! # Example
//!
//! ```rust,ignore
//! use tribble_api_auth::{users_router, AuthState};
//!
//! let state = AuthState::new(repo, issuer, validator, CredentialStore::new());
//! let app = Router::new().merge(users_router(state));
//! ```

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;

pub use error::{ApiError, ProblemDetails};
pub use router::{users_router, AuthState};
