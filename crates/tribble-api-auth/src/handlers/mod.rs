//! HTTP handlers.

pub mod login;
pub mod me;
pub mod refresh;
pub mod register;
pub mod users;

pub use login::login_handler;
pub use me::me_handler;
pub use refresh::{refresh_handler, validate_handler};
pub use register::register_handler;
pub use users::{delete_user_handler, get_user_handler, list_users_handler, update_user_handler};
