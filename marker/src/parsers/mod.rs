//! # Parsers
//!
//! Text heuristics applied to submissions and to grading replies.
//!
//! - [`identity_parser`]: Guesses the student's name and roll number from document text.
//! - [`response_parser`]: Pulls the awarded marks and the feedback out of a grading reply.
//!
//! Neither parser can fail. When nothing recognisable is found they fall back to
//! sentinel values (identity) or to the raw reply (grading).

pub mod identity_parser;
pub mod response_parser;
