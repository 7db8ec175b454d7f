//! Refresh-token endpoints.
//!
//! - POST /users/validate - Check that a refresh token is live.
//! - POST /users/refresh - Rotate the token pair.

use std::sync::Arc;

use axum::{Extension, Json};

use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::models::{RefreshRequest, RefreshResponse, ValidateResponse};
use crate::services::AuthService;

#[utoipa::path(
    post,
    path = "/users/validate",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Refresh token is live", body = ValidateResponse),
        (status = 404, description = "Refresh token does not resolve", body = crate::error::ProblemDetails),
    ),
    tag = "Sessions"
)]
pub async fn validate_handler(
    Extension(auth_service): Extension<Arc<AuthService>>,
    ValidatedJson(request): ValidatedJson<RefreshRequest>,
) -> Result<Json<ValidateResponse>, ApiError> {
    auth_service.validate(&request.refresh_token).await?;
    Ok(Json(ValidateResponse { ok: true }))
}

/// Handle token refresh.
///
/// Resolves the caller by refresh token, mints a new pair and overwrites
/// the stored one. The presented refresh token stops resolving.
#[utoipa::path(
    post,
    path = "/users/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Tokens rotated", body = RefreshResponse),
        (status = 404, description = "Refresh token does not resolve", body = crate::error::ProblemDetails),
        (status = 500, description = "New pair could not be persisted", body = crate::error::ProblemDetails),
    ),
    tag = "Sessions"
)]
pub async fn refresh_handler(
    Extension(auth_service): Extension<Arc<AuthService>>,
    ValidatedJson(request): ValidatedJson<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let pair = auth_service.refresh(&request.refresh_token).await?;

    Ok(Json(RefreshResponse {
        token: pair.access,
        refresh_token: pair.refresh,
    }))
}
