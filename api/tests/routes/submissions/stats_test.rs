#[cfg(test)]
mod tests {
    use crate::helpers::app::make_test_app;
    use crate::helpers::fixtures::{body_json, get_request};
    use axum::http::StatusCode;
    use db::models::submission::Model as SubmissionModel;
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;

    /// Test Case: Statistics over an empty store
    #[tokio::test]
    #[serial]
    async fn stats_empty() {
        let (app, _) = make_test_app().await;

        let response = app.oneshot(get_request("/api/stats")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["message"], "Statistics retrieved successfully");
        assert_eq!(
            json["data"],
            json!({
                "total_submissions": 0,
                "evaluated_submissions": 0,
                "pending_submissions": 0,
                "average_percentage": 0.0
            })
        );
    }

    /// Test Case: The average is taken over evaluated submissions only
    #[tokio::test]
    #[serial]
    async fn stats_with_evaluations() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();

        let a = SubmissionModel::create(db, "A", "1001", "a.txt", "text").await.unwrap();
        let b = SubmissionModel::create(db, "B", "1002", "b.txt", "text").await.unwrap();
        SubmissionModel::create(db, "C", "1003", "c.txt", "text").await.unwrap();

        SubmissionModel::record_evaluation(db, &a.id, 15, 20, "f", "Admin")
            .await
            .unwrap();
        SubmissionModel::record_evaluation(db, &b.id, 10, 40, "f", "Admin")
            .await
            .unwrap();

        let response = app.oneshot(get_request("/api/stats")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let data = &body_json(response).await["data"];
        assert_eq!(data["total_submissions"], 3);
        assert_eq!(data["evaluated_submissions"], 2);
        assert_eq!(data["pending_submissions"], 1);
        assert_eq!(data["average_percentage"], 41.67);
    }
}
