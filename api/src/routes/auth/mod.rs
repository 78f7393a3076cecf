//! # auth Routes Module
//!
//! - `post.rs`: `POST /login`, the single configured admin credential check.
//!
//! There is no session or token: a successful login only returns the admin's
//! profile for the client to display.

pub mod post;

use crate::state::AppState;
use axum::{Router, routing::post};
use post::login;

/// - `POST /login` → `login`
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}
