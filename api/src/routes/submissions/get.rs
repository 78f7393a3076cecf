use crate::response::ApiResponse;
use crate::routes::common::{SubmissionResponse, format_validation_errors};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::submission::{Model as SubmissionModel, SubmissionStats};
use serde::Deserialize;
use validator::Validate;

fn default_limit() -> u64 {
    50
}

#[derive(Debug, Deserialize, Validate)]
pub struct ListSubmissionsQuery {
    pub search: Option<String>,
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 500, message = "limit must be between 1 and 500"))]
    pub limit: u64,
}

/// GET /submissions
///
/// Lists submissions, newest first.
///
/// ### Query Parameters
/// - `search` (optional): case-insensitive substring matched against the student name,
///   roll number and file name; `%` and `_` are matched literally
/// - `skip` (optional, default `0`)
/// - `limit` (optional, default `50`, `1..=500`)
///
/// ### Responses
/// - `200 OK` with an array of submissions as data, message `Submissions retrieved successfully`
/// - `400 Bad Request` when `limit` is out of range or a parameter is not a number
/// - `500 Internal Server Error`: `Error fetching submissions`
pub async fn list_submissions(
    State(app_state): State<AppState>,
    Query(query): Query<ListSubmissionsQuery>,
) -> impl IntoResponse {
    if let Err(e) = query.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Vec<SubmissionResponse>>::error(
                format_validation_errors(&e),
            )),
        );
    }

    match SubmissionModel::search(
        app_state.db(),
        query.search.as_deref(),
        query.skip,
        query.limit,
    )
    .await
    {
        Ok(rows) => {
            let data: Vec<SubmissionResponse> =
                rows.into_iter().map(SubmissionResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    data,
                    "Submissions retrieved successfully",
                )),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list submissions");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<SubmissionResponse>>::error(
                    "Error fetching submissions",
                )),
            )
        }
    }
}

/// GET /submission/{submission_id}
///
/// ### Responses
/// - `200 OK` with the submission as data
/// - `404 Not Found`: `Submission not found`
/// - `500 Internal Server Error`: `Error fetching submission`
pub async fn get_submission(
    State(app_state): State<AppState>,
    Path(submission_id): Path<String>,
) -> impl IntoResponse {
    match SubmissionModel::find_by_id(app_state.db(), &submission_id).await {
        Ok(Some(submission)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(SubmissionResponse::from(submission)),
                "Submission retrieved successfully",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Option<SubmissionResponse>>::error(
                "Submission not found",
            )),
        ),
        Err(e) => {
            tracing::error!(id = %submission_id, error = %e, "Failed to load submission");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Option<SubmissionResponse>>::error(
                    "Error fetching submission",
                )),
            )
        }
    }
}

/// GET /stats
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "total_submissions": 3,
///     "evaluated_submissions": 2,
///     "pending_submissions": 1,
///     "average_percentage": 41.67
///   },
///   "message": "Statistics retrieved successfully"
/// }
/// ```
pub async fn get_stats(State(app_state): State<AppState>) -> impl IntoResponse {
    match SubmissionModel::statistics(app_state.db()).await {
        Ok(stats) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(stats),
                "Statistics retrieved successfully",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to compute statistics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Option<SubmissionStats>>::error(
                    "Error fetching statistics",
                )),
            )
        }
    }
}
