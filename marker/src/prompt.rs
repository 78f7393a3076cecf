//! Grading prompt construction.

use serde::Serialize;

/// Instructions sent as the system message of every grading request.
pub const GRADING_SYSTEM_PROMPT: &str = "You are an experienced university professor evaluating student assignments.
Your task is to:
1. Carefully read and analyze the assignment content
2. Provide marks based on the maximum marks available
3. Give constructive feedback highlighting strengths and areas for improvement
4. Be fair but thorough in your evaluation
5. Consider content quality, understanding, presentation, and completeness";

/// The two messages of a grading request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradingPrompt {
    pub system: String,
    pub user: String,
}

impl GradingPrompt {
    /// Builds the prompt for a submission. Only the first `char_limit` characters of
    /// `text` are included.
    pub fn for_submission(text: &str, max_marks: i64, char_limit: usize) -> Self {
        let excerpt: String = text.chars().take(char_limit).collect();

        let user = format!(
            "Please evaluate this student assignment out of {max_marks} marks.\n\n\
             Assignment Content:\n{excerpt}\n\n\
             Please provide:\n\
             1. A numerical score out of {max_marks}\n\
             2. Detailed feedback explaining the grade\n\n\
             Format your response as:\n\
             MARKS: [numerical score]\n\
             FEEDBACK: [detailed feedback]"
        );

        Self {
            system: GRADING_SYSTEM_PROMPT.to_string(),
            user,
        }
    }
}
