//! # submissions Routes Module
//!
//! ## Structure
//! - `post.rs`: `POST /upload` (document intake) and `POST /evaluate` (grading)
//! - `get.rs`: `GET /submissions`, `GET /submission/{id}` and `GET /stats`
//! - `export.rs`: `GET /export/excel`

pub mod export;
pub mod get;
pub mod post;

use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use util::config;

/// Builds the submission routes.
///
/// - `POST /upload` → `post::upload_submission` (body limit `MAX_UPLOAD_BYTES`)
/// - `POST /evaluate` → `post::evaluate_submission`
/// - `GET /submissions` → `get::list_submissions`
/// - `GET /submission/{submission_id}` → `get::get_submission`
/// - `GET /stats` → `get::get_stats`
/// - `GET /export/excel` → `export::export_excel`
pub fn submission_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(post::upload_submission).layer(DefaultBodyLimit::max(config::max_upload_bytes())),
        )
        .route("/evaluate", post(post::evaluate_submission))
        .route("/submissions", get(get::list_submissions))
        .route("/submission/{submission_id}", get(get::get_submission))
        .route("/stats", get(get::get_stats))
        .route("/export/excel", get(export::export_excel))
}
