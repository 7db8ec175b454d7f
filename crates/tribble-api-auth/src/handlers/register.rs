//! Registration endpoint handler.
//!
//! POST /users - Create an account.

use std::sync::Arc;

use axum::{http::StatusCode, Extension, Json};

use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::models::{RegisterRequest, RegisterResponse};
use crate::services::AuthService;

/// Handle user registration.
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = RegisterResponse),
        (status = 400, description = "Invalid body, identifier taken, or value too long", body = crate::error::ProblemDetails),
    ),
    tag = "Users"
)]
pub async fn register_handler(
    Extension(auth_service): Extension<Arc<AuthService>>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let id = auth_service
        .register(
            &request.identifier,
            request.email.as_deref(),
            &request.password,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { id })))
}
