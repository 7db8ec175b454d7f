//! GET /users/me - The authenticated principal.

use axum::{Extension, Json};
use tribble_core::Principal;

use crate::models::MeResponse;

#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Current principal", body = MeResponse),
        (status = 401, description = "Missing Authorization header", body = crate::error::ProblemDetails),
        (status = 403, description = "Invalid or expired token", body = crate::error::ProblemDetails),
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn me_handler(Extension(principal): Extension<Principal>) -> Json<MeResponse> {
    Json(MeResponse::from(principal))
}
