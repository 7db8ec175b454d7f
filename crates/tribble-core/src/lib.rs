//! tribble Core Library
//!
//! Shared types for tribble.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed identifiers (UserId)
//! - [`principal`] - The authenticated identity attached to a request
//!
//! # Example
//!
//! ```
//! use tribble_core::{Principal, UserId};
//!
//! let principal = Principal::new(UserId::new(7), "alice");
//! assert_eq!(principal.id.get(), 7);
//! ```

pub mod ids;
pub mod principal;

pub use ids::{ParseIdError, UserId};
pub use principal::Principal;
