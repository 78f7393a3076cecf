//! # Grading Backends
//!
//! Implementations of the [`Grader`](crate::traits::grader::Grader) trait.
//!
//! - [`ai_feedback`]: Grades by asking a Large Language Model through an OpenAI-compatible
//!   chat-completions endpoint.

pub mod ai_feedback;
