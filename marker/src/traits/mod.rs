//!
//! Traits Module
//!
//! - [`grader`]: The seam between the marker and whatever service produces grading replies.

pub mod grader;
