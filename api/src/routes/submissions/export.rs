use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use db::models::submission::Model as SubmissionModel;
use util::spreadsheet::{Cell, Worksheet, XLSX_CONTENT_TYPE};

pub const EXPORT_FILE_NAME: &str = "assignment_submissions.xlsx";
const SHEET_NAME: &str = "Assignment Submissions";
const HEADER: [&str; 9] = [
    "Student Name",
    "Roll Number",
    "File Name",
    "Marks",
    "Max Marks",
    "Percentage",
    "Feedback",
    "Submitted Date",
    "Evaluated Date",
];

/// GET /export/excel
///
/// Downloads every submission, newest first, as an XLSX workbook.
///
/// ### Responses
/// - `200 OK`: `application/vnd.openxmlformats-officedocument.spreadsheetml.sheet`
///   attachment named `assignment_submissions.xlsx`
/// - `500 Internal Server Error`: `Error creating Excel export`
pub async fn export_excel(State(app_state): State<AppState>) -> Response {
    let submissions = match SubmissionModel::all_newest_first(app_state.db()).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load submissions for export");
            return export_failed();
        }
    };

    let workbook = match submissions_sheet(&submissions).to_xlsx() {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build export workbook");
            return export_failed();
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(XLSX_CONTENT_TYPE));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename={EXPORT_FILE_NAME}"))
            .unwrap_or(HeaderValue::from_static("attachment")),
    );

    (StatusCode::OK, headers, workbook).into_response()
}

fn export_failed() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("Error creating Excel export")),
    )
        .into_response()
}

/// Lays out one row per submission under the fixed header.
pub fn submissions_sheet(submissions: &[SubmissionModel]) -> Worksheet {
    let mut sheet = Worksheet::new(SHEET_NAME, HEADER);

    for s in submissions {
        sheet.push_row(vec![
            Cell::from(s.student_name.as_str()),
            Cell::from(s.roll_number.as_str()),
            Cell::from(s.file_name.as_str()),
            Cell::from(s.marks),
            Cell::from(s.max_marks),
            Cell::from(percentage(s.marks, s.max_marks)),
            Cell::from(s.feedback.clone()),
            Cell::from(format_timestamp(&s.submitted_at)),
            Cell::from(s.evaluated_at.as_ref().map(format_timestamp)),
        ]);
    }

    sheet
}

/// `"75.0%"`, `"41.67%"`; `None` unless both values are present and non-zero.
fn percentage(marks: Option<i64>, max_marks: Option<i64>) -> Option<String> {
    match (marks, max_marks) {
        (Some(marks), Some(max)) if marks != 0 && max != 0 => {
            let pct = ((marks as f64 / max as f64) * 100.0 * 100.0).round() / 100.0;
            if pct.fract() == 0.0 {
                Some(format!("{pct:.1}%"))
            } else {
                Some(format!("{pct}%"))
            }
        }
        _ => None,
    }
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}
