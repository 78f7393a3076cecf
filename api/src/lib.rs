//! HTTP surface of the assignment checker.
//!
//! - [`routes`]: the `/api` router and its handlers.
//! - [`middleware`]: request logging.
//! - [`state`]: shared handler state (database and grading backend).
//! - [`response`]: the JSON envelope every handler answers with.

pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
