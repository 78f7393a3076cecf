use crate::response::ApiResponse;
use crate::routes::common::{SubmissionResponse, format_validation_errors};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::submission::Model as SubmissionModel;
use marker::grade_submission;
use marker::parsers::identity_parser::extract_student_details;
use serde::{Deserialize, Serialize};
use std::path::Path;
use util::config;
use util::documents::{DocumentKind, extract_text};
use validator::Validate;

fn upload_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ApiResponse::<Option<SubmissionResponse>>::error(message)),
    )
        .into_response()
}

/// POST /upload
///
/// Accepts one assignment document, extracts its text, guesses the student's name
/// and roll number from it and stores a new pending submission.
///
/// ### Request Body (Multipart Form Data)
/// - `file` (file, required): a `.pdf`, `.docx` or `.txt` document. Other fields are ignored;
///   if several `file` fields are sent the last one wins.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": "9b2f4c1e-...",
///     "student_name": "Jane Doe",
///     "roll_number": "CS2020123",
///     "file_name": "essay.pdf",
///     "original_text": "Name: Jane Doe ...",
///     "marks": null,
///     "max_marks": null,
///     "feedback": null,
///     "submitted_at": "2025-03-01T09:00:00+00:00",
///     "evaluated_at": null,
///     "evaluated_by": null
///   },
///   "message": "File uploaded successfully"
/// }
/// ```
///
/// - `400 Bad Request`: `No file selected`, `Only PDF, DOCX, and TXT files are allowed`
///   or `Could not extract text from the file`
/// - `413 Payload Too Large`: body exceeds `MAX_UPLOAD_BYTES`
/// - `500 Internal Server Error`: `Error processing file`
pub async fn upload_submission(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut upload: Option<(String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return upload_error(e.status(), e.body_text()),
        };

        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_owned();
        match field.bytes().await {
            Ok(bytes) => upload = Some((file_name, bytes.to_vec())),
            Err(e) => return upload_error(e.status(), e.body_text()),
        }
    }

    let Some((file_name, bytes)) = upload.filter(|(name, _)| !name.trim().is_empty()) else {
        return upload_error(StatusCode::BAD_REQUEST, "No file selected");
    };

    let extension = Path::new(&file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_owned();
    if DocumentKind::from_extension(&extension).is_none() {
        return upload_error(
            StatusCode::BAD_REQUEST,
            "Only PDF, DOCX, and TXT files are allowed",
        );
    }

    let text = match tokio::task::spawn_blocking(move || extract_text(&bytes, &extension)).await
    {
        Ok(Ok(text)) if !text.is_empty() => text,
        Ok(Ok(_)) => {
            tracing::warn!(file = %file_name, "Uploaded document contains no text");
            return upload_error(
                StatusCode::BAD_REQUEST,
                "Could not extract text from the file",
            );
        }
        Ok(Err(e)) => {
            tracing::warn!(file = %file_name, error = %e, "Text extraction failed");
            return upload_error(
                StatusCode::BAD_REQUEST,
                "Could not extract text from the file",
            );
        }
        Err(e) => {
            tracing::error!(file = %file_name, error = %e, "Text extraction task failed");
            return upload_error(StatusCode::INTERNAL_SERVER_ERROR, "Error processing file");
        }
    };

    let details = extract_student_details(&text);

    match SubmissionModel::create(
        app_state.db(),
        &details.name,
        &details.roll_number,
        &file_name,
        &text,
    )
    .await
    {
        Ok(submission) => {
            tracing::info!(
                id = %submission.id,
                student = %submission.student_name,
                roll_number = %submission.roll_number,
                "Stored submission"
            );
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    Some(SubmissionResponse::from(submission)),
                    "File uploaded successfully",
                )),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to store submission");
            upload_error(StatusCode::INTERNAL_SERVER_ERROR, "Error processing file")
        }
    }
}

fn default_evaluator() -> String {
    "Admin".to_string()
}

#[derive(Debug, Deserialize, Validate)]
pub struct EvaluateRequest {
    #[validate(length(min = 1, message = "submission_id is required"))]
    pub submission_id: String,
    #[validate(range(min = 1, message = "max_marks must be at least 1"))]
    pub max_marks: i64,
    #[serde(default = "default_evaluator")]
    #[validate(length(min = 1, message = "evaluator_name must not be empty"))]
    pub evaluator_name: String,
}

#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub marks: i64,
    pub max_marks: i64,
    pub feedback: String,
}

fn evaluate_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ApiResponse::<Option<EvaluationResponse>>::error(message)),
    )
        .into_response()
}

/// POST /evaluate
///
/// Grades a pending submission with the configured grading backend and stores the
/// result. A submission can only be evaluated once.
///
/// ### Request Body
/// ```json
/// { "submission_id": "9b2f4c1e-...", "max_marks": 20, "evaluator_name": "Dr. Smith" }
/// ```
/// `evaluator_name` defaults to `"Admin"`.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "marks": 15, "max_marks": 20, "feedback": "Good work, but missing citations." },
///   "message": "Assignment evaluated successfully"
/// }
/// ```
///
/// - `400 Bad Request` (validation)
/// - `404 Not Found`: `Submission not found`
/// - `409 Conflict`: `Submission has already been evaluated`
/// - `502 Bad Gateway`: `Grading response did not contain a score` (nothing is stored)
/// - `500 Internal Server Error`: `Error evaluating assignment`
pub async fn evaluate_submission(
    State(app_state): State<AppState>,
    Json(req): Json<EvaluateRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return evaluate_error(
            StatusCode::BAD_REQUEST,
            format_validation_errors(&validation_errors),
        );
    }

    let db = app_state.db();

    let submission = match SubmissionModel::find_by_id(db, &req.submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => return evaluate_error(StatusCode::NOT_FOUND, "Submission not found"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load submission");
            return evaluate_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error evaluating assignment",
            );
        }
    };

    if submission.is_evaluated() {
        return evaluate_error(
            StatusCode::CONFLICT,
            "Submission has already been evaluated",
        );
    }

    let outcome = match grade_submission(
        app_state.grader(),
        &submission.original_text,
        req.max_marks,
        config::llm_prompt_char_limit(),
    )
    .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(id = %submission.id, error = %e, "Grading call failed");
            return evaluate_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error evaluating assignment",
            );
        }
    };

    let Some(marks) = outcome.marks else {
        return evaluate_error(
            StatusCode::BAD_GATEWAY,
            "Grading response did not contain a score",
        );
    };

    match SubmissionModel::record_evaluation(
        db,
        &submission.id,
        marks,
        req.max_marks,
        &outcome.feedback,
        &req.evaluator_name,
    )
    .await
    {
        Ok(Some(updated)) => {
            tracing::info!(id = %updated.id, marks, max_marks = req.max_marks, "Submission evaluated");
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    Some(EvaluationResponse {
                        marks,
                        max_marks: req.max_marks,
                        feedback: outcome.feedback,
                    }),
                    "Assignment evaluated successfully",
                )),
            )
                .into_response()
        }
        // Evaluated concurrently while the grading call was in flight.
        Ok(None) => evaluate_error(
            StatusCode::CONFLICT,
            "Submission has already been evaluated",
        ),
        Err(e) => {
            tracing::error!(id = %submission.id, error = %e, "Failed to store evaluation");
            evaluate_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error evaluating assignment",
            )
        }
    }
}
