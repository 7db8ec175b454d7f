//! Business logic behind the handlers.

mod auth_service;
mod user_service;

pub use auth_service::AuthService;
pub use user_service::UserService;
