use crate::response::ApiResponse;
use crate::routes::common::format_validation_errors;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use util::config;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub full_name: String,
    pub role: String,
}

/// POST /login
///
/// Checks the credentials against the configured admin account
/// (`ADMIN_USERNAME` / `ADMIN_PASSWORD`).
///
/// ### Request Body
/// ```json
/// { "username": "admin", "password": "admin123" }
/// ```
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "username": "admin", "full_name": "Administrator", "role": "admin" },
///   "message": "Login successful"
/// }
/// ```
///
/// - `400 Bad Request` (empty username or password)
/// - `401 Unauthorized`
/// ```json
/// { "success": false, "data": null, "message": "Invalid credentials" }
/// ```
pub async fn login(Json(req): Json<LoginRequest>) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Option<LoginResponse>>::error(error_message)),
        );
    }

    let username = config::admin_username();
    if req.username != username || req.password != config::admin_password() {
        tracing::warn!(username = %req.username, "Rejected login attempt");
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<Option<LoginResponse>>::error(
                "Invalid credentials",
            )),
        );
    }

    let user = LoginResponse {
        username,
        full_name: config::admin_full_name(),
        role: "admin".to_string(),
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(Some(user), "Login successful")),
    )
}
