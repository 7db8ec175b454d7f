//! User account endpoints.
//!
//! - GET /users
//! - GET /users/:id
//! - PUT /users/:id (owner only)
//! - DELETE /users/:id (owner only)

use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, Extension, Json};
use tribble_core::{Principal, UserId};

use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::models::{UpdateUserRequest, UserResponse};
use crate::services::UserService;

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::Validation(format!("Invalid user id: {raw}")))
}

/// List all users, unordered.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 503, description = "Store timeout", body = crate::error::ProblemDetails),
    ),
    tag = "Users"
)]
pub async fn list_users_handler(
    Extension(user_service): Extension<Arc<UserService>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = user_service.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Malformed user id", body = crate::error::ProblemDetails),
        (status = 404, description = "User not found", body = crate::error::ProblemDetails),
    ),
    tag = "Users"
)]
pub async fn get_user_handler(
    Extension(user_service): Extension<Arc<UserService>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = user_service.get(parse_user_id(&id)?).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Replace the caller's identifier and email.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 204, description = "Profile replaced"),
        (status = 400, description = "Invalid body or id, identifier taken, or value too long", body = crate::error::ProblemDetails),
        (status = 401, description = "Missing Authorization header", body = crate::error::ProblemDetails),
        (status = 403, description = "Invalid token or not the owner", body = crate::error::ProblemDetails),
        (status = 404, description = "User not found", body = crate::error::ProblemDetails),
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn update_user_handler(
    Extension(user_service): Extension<Arc<UserService>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<StatusCode, ApiError> {
    user_service
        .update_profile(
            &principal,
            parse_user_id(&id)?,
            &request.identifier,
            request.email.as_deref(),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Malformed user id", body = crate::error::ProblemDetails),
        (status = 401, description = "Missing Authorization header", body = crate::error::ProblemDetails),
        (status = 403, description = "Invalid token or not the owner", body = crate::error::ProblemDetails),
        (status = 404, description = "User not found", body = crate::error::ProblemDetails),
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn delete_user_handler(
    Extension(user_service): Extension<Arc<UserService>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    user_service.delete(&principal, parse_user_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
