//! # Marker Library
//!
//! The text-analysis half of the assignment checker.
//!
//! ## Key Concepts
//! - **Identity extraction**: [`parsers::identity_parser`] guesses the student's name and
//!   roll number from a submission's text.
//! - **Grading**: [`grade_submission`] builds a [`prompt::GradingPrompt`], hands it to a
//!   [`traits::grader::Grader`] and parses the reply with
//!   [`parsers::response_parser`].
//! - **Backends**: [`feedback::ai_feedback::AiGrader`] talks to an OpenAI-compatible
//!   chat-completions endpoint.

pub mod error;
pub mod feedback;
pub mod parsers;
pub mod prompt;
pub mod traits;

use crate::error::MarkerError;
use crate::parsers::response_parser::{GradingOutcome, parse_grading_response};
use crate::prompt::GradingPrompt;
use crate::traits::grader::Grader;

/// Grades one submission.
///
/// # Arguments
/// - `grader`: Backend that produces the raw reply.
/// - `text`: Extracted submission text; only the first `char_limit` characters are sent.
/// - `max_marks`: Upper bound for the awarded marks.
///
/// # Returns
/// The parsed [`GradingOutcome`]. Its `marks` is `None` when the reply carried no score;
/// deciding what to do with such a reply is left to the caller.
pub async fn grade_submission(
    grader: &dyn Grader,
    text: &str,
    max_marks: i64,
    char_limit: usize,
) -> Result<GradingOutcome, MarkerError> {
    let prompt = GradingPrompt::for_submission(text, max_marks, char_limit);
    let reply = grader.grade(&prompt).await?;

    let outcome = parse_grading_response(&reply, max_marks);
    if outcome.marks.is_none() {
        tracing::warn!(reply_len = reply.len(), "Grading reply contained no score");
    }

    Ok(outcome)
}
