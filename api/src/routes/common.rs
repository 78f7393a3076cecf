use db::models::submission::Model as SubmissionModel;
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

/// Joins the messages of every failed validation rule.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// A submission as returned by the API.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub id: String,
    pub student_name: String,
    pub roll_number: String,
    pub file_name: String,
    pub original_text: String,
    pub marks: Option<i64>,
    pub max_marks: Option<i64>,
    pub feedback: Option<String>,
    pub submitted_at: String,
    pub evaluated_at: Option<String>,
    pub evaluated_by: Option<String>,
}

impl From<SubmissionModel> for SubmissionResponse {
    fn from(submission: SubmissionModel) -> Self {
        Self {
            id: submission.id,
            student_name: submission.student_name,
            roll_number: submission.roll_number,
            file_name: submission.file_name,
            original_text: submission.original_text,
            marks: submission.marks,
            max_marks: submission.max_marks,
            feedback: submission.feedback,
            submitted_at: submission.submitted_at.to_rfc3339(),
            evaluated_at: submission.evaluated_at.map(|t| t.to_rfc3339()),
            evaluated_by: submission.evaluated_by,
        }
    }
}
