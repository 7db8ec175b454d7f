//! Request and response DTOs.

mod requests;
mod responses;

pub use requests::{LoginRequest, RefreshRequest, RegisterRequest, UpdateUserRequest};
pub use responses::{
    LoginResponse, MeResponse, RefreshResponse, RegisterResponse, UserResponse, ValidateResponse,
};
