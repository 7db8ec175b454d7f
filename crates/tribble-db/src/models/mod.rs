//! Database models.

mod user;

pub(crate) use user::overlong_field;
pub use user::{NewUser, User, EMAIL_MAX_LEN, IDENTIFIER_MAX_LEN};
