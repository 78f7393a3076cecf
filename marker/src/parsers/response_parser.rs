//! Grading reply parser.
//!
//! Grading replies are requested in the shape
//!
//! ```text
//! MARKS: <score>
//! FEEDBACK: <free text>
//! ```
//!
//! but models do not always comply, so parsing is lenient: labels are matched
//! case-insensitively anywhere in the reply, decimal scores are truncated, scores
//! above the maximum are clamped, and a reply without a `FEEDBACK` label is kept
//! verbatim as the feedback.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static MARKS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)MARKS?[:=\s]*([0-9]+(?:\.[0-9]+)?)").expect("static marks pattern")
});

static FEEDBACK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)FEEDBACK[:=\s]*(.*)").expect("static feedback pattern"));

/// What a grading reply amounts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradingOutcome {
    /// Awarded marks, or `None` when the reply carries no recognisable score.
    pub marks: Option<i64>,
    pub feedback: String,
}

/// Parses a grading reply against the submission's `max_marks`.
///
/// The score comes from the first `MARK`/`MARKS` label followed by a number; its
/// fractional part is dropped and it is capped at `max_marks`. Feedback is
/// everything after the first `FEEDBACK` label, trimmed; without that label it
/// is the whole reply, trimmed.
pub fn parse_grading_response(reply: &str, max_marks: i64) -> GradingOutcome {
    let marks = MARKS_PATTERN
        .captures(reply)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .map(|score| (score.trunc() as i64).min(max_marks));

    let feedback = FEEDBACK_PATTERN
        .captures(reply)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| reply.trim().to_string());

    GradingOutcome { marks, feedback }
}
