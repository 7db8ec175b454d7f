//! Login endpoint handler.
//!
//! POST /users/login - Verify credentials and issue a token pair.

use std::sync::Arc;

use axum::{Extension, Json};

use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::models::{LoginRequest, LoginResponse};
use crate::services::AuthService;

/// Handle user login.
#[utoipa::path(
    post,
    path = "/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid body or invalid password", body = crate::error::ProblemDetails),
        (status = 404, description = "Unknown identifier", body = crate::error::ProblemDetails),
    ),
    tag = "Sessions"
)]
pub async fn login_handler(
    Extension(auth_service): Extension<Arc<AuthService>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (id, pair) = auth_service
        .login(&request.identifier, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        id,
        token: pair.access,
        refresh_token: pair.refresh,
    }))
}
