//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/` → Service banner (public)
//! - `/health` → Health check endpoint (public)
//! - `/login` → Admin credential check (public)
//! - `/upload`, `/evaluate`, `/submissions`, `/submission/{id}`, `/stats`,
//!   `/export/excel` → Submission intake, grading and reporting

use crate::routes::{
    auth::auth_routes, health::health_routes, submissions::submission_routes,
};
use crate::state::AppState;
use axum::{Json, Router, response::IntoResponse, routing::get};
use serde_json::json;

pub mod auth;
pub mod common;
pub mod health;
pub mod submissions;

/// Builds the application router for all HTTP endpoints, to be nested under `/api`.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .nest("/health", health_routes())
        .merge(auth_routes())
        .merge(submission_routes())
        .with_state(app_state)
}

/// GET /api
///
/// ```json
/// { "message": "Smart Assignment Checker API" }
/// ```
async fn index() -> impl IntoResponse {
    Json(json!({ "message": "Smart Assignment Checker API" }))
}
