//! `OpenAPI` document, served as JSON at `/api-docs/openapi.json`.

use axum::Json;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::health::HealthResponse;
use tribble_api_auth::models::{
    LoginRequest, LoginResponse, MeResponse, RefreshRequest, RefreshResponse, RegisterRequest,
    RegisterResponse, UpdateUserRequest, UserResponse, ValidateResponse,
};
use tribble_api_auth::ProblemDetails;

/// Security scheme modifier for Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "tribble API",
        version = "0.1.0",
        description = "Credential and session service"
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Sessions", description = "Login, token validation and refresh"),
        (name = "Users", description = "User accounts"),
    ),
    paths(
        crate::health::health_handler,
        tribble_api_auth::handlers::login::login_handler,
        tribble_api_auth::handlers::refresh::validate_handler,
        tribble_api_auth::handlers::refresh::refresh_handler,
        tribble_api_auth::handlers::register::register_handler,
        tribble_api_auth::handlers::users::list_users_handler,
        tribble_api_auth::handlers::users::get_user_handler,
        tribble_api_auth::handlers::users::update_user_handler,
        tribble_api_auth::handlers::users::delete_user_handler,
        tribble_api_auth::handlers::me::me_handler,
    ),
    components(schemas(
        HealthResponse,
        ProblemDetails,
        LoginRequest,
        LoginResponse,
        RefreshRequest,
        RefreshResponse,
        ValidateResponse,
        RegisterRequest,
        RegisterResponse,
        UpdateUserRequest,
        UserResponse,
        MeResponse,
    ))
)]
pub struct ApiDoc;

pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
