//!
//! Identity Parser Module
//!
//! Guesses who wrote a submission by running an ordered cascade of patterns over
//! the extracted document text. The first acceptable hit wins; later patterns are
//! only consulted when earlier ones find nothing usable.
//!
//! # Name cascade
//!
//! 1. A `Name`, `Student Name` or `Full Name` label followed by letters, stopping at a
//!    line break, `Roll`, `ID` or the end of a line.
//! 2. `Name:` / `Name =` followed by letters.
//! 3. A `Student` label followed by letters, stopping at a line break, `Roll` or `ID`.
//! 4. A leading line of 2 to 30 letters followed by a line break, `Roll`, `ID` or `Reg`.
//!
//! A captured name is only accepted when, once trimmed, it is longer than two
//! characters and contains no digits.
//!
//! # Roll number cascade
//!
//! 1. A `Roll No`, `Roll Number`, `Registration No`, `Reg No`, `ID` or `Student ID` label.
//! 2. A bare `Roll` label.
//! 3. An `ID` or `REG` label.
//! 4. Any run of four or more digits, with trailing letters, digits, `-` or `/`.
//!
//! All labels match case-insensitively. The heuristics are deliberately permissive and
//! will produce false positives on unlabelled text; callers treat the result as a guess.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Name reported when no pattern yields an acceptable name.
pub const UNKNOWN_STUDENT: &str = "Unknown Student";
/// Roll number reported when no pattern matches.
pub const UNKNOWN_ROLL_NUMBER: &str = "Unknown";

static NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?im)(?:Name|Student Name|Full Name)[:=\s]*([A-Za-z\s]+?)(?:\n|Roll|ID|$)",
        r"(?im)Name\s*[:=]\s*([A-Za-z\s]+)",
        r"(?im)Student[:=\s]*([A-Za-z\s]+?)(?:\n|Roll|ID)",
        r"(?im)^([A-Za-z\s]{2,30})(?:\n|Roll|ID|Reg)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static name pattern"))
    .collect()
});

static ROLL_NUMBER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(?:Roll No|Roll Number|Registration No|Reg No|ID|Student ID)[:=\s]*([A-Za-z0-9\-/]+)",
        r"(?i)Roll[:=\s]*([A-Za-z0-9\-/]+)",
        r"(?i)(?:ID|REG)[:=\s]*([A-Za-z0-9\-/]+)",
        r"(?i)([0-9]{4,}[A-Za-z0-9\-/]*)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static roll number pattern"))
    .collect()
});

/// The identity guessed for a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentDetails {
    pub name: String,
    pub roll_number: String,
}

impl StudentDetails {
    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN_STUDENT.to_string(),
            roll_number: UNKNOWN_ROLL_NUMBER.to_string(),
        }
    }
}

/// Runs both cascades over `text`. Never fails; unmatched fields keep their sentinels.
pub fn extract_student_details(text: &str) -> StudentDetails {
    let mut details = StudentDetails::unknown();

    if let Some(name) = extract_name(text) {
        details.name = name;
    }
    if let Some(roll_number) = extract_roll_number(text) {
        details.roll_number = roll_number;
    }

    details
}

fn extract_name(text: &str) -> Option<String> {
    NAME_PATTERNS
        .iter()
        .find_map(|re| first_capture(re, text).filter(|name| is_acceptable_name(name)))
}

fn extract_roll_number(text: &str) -> Option<String> {
    ROLL_NUMBER_PATTERNS
        .iter()
        .find_map(|re| first_capture(re, text).filter(|roll| !roll.is_empty()))
}

/// Trimmed first capture group of the leftmost match only.
fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn is_acceptable_name(candidate: &str) -> bool {
    candidate.chars().count() > 2 && !candidate.chars().any(char::is_numeric)
}
