pub mod app;
pub mod fixtures;

pub use app::{StubGrader, make_test_app, make_test_app_with_grader};
