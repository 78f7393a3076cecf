#[cfg(test)]
mod tests {
    use crate::helpers::app::{StubGrader, make_test_app, make_test_app_with_grader};
    use crate::helpers::fixtures::{body_json, json_request};
    use axum::http::StatusCode;
    use db::models::submission::Model as SubmissionModel;
    use sea_orm::DatabaseConnection;
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;
    use util::config::AppConfig;

    const ESSAY: &str = "Name: Jane Doe\nRoll No: CS2020123\n\nRivers shape the land over time.";

    async fn pending_submission(db: &DatabaseConnection) -> SubmissionModel {
        SubmissionModel::create(db, "Jane Doe", "CS2020123", "essay.txt", ESSAY)
            .await
            .unwrap()
    }

    /// Test Case: Evaluating a pending submission stores the grade
    #[tokio::test]
    #[serial]
    async fn evaluate_success() {
        let (app, app_state) = make_test_app().await;
        let submission = pending_submission(app_state.db()).await;

        let req = json_request(
            "POST",
            "/api/evaluate",
            json!({ "submission_id": submission.id, "max_marks": 20 }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Assignment evaluated successfully");
        assert_eq!(json["data"]["marks"], 15);
        assert_eq!(json["data"]["max_marks"], 20);
        assert_eq!(json["data"]["feedback"], "Good work, but missing citations.");

        let stored = SubmissionModel::find_by_id(app_state.db(), &submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.marks, Some(15));
        assert_eq!(stored.max_marks, Some(20));
        assert_eq!(stored.feedback.as_deref(), Some("Good work, but missing citations."));
        assert_eq!(stored.evaluated_by.as_deref(), Some("Admin"));
        assert!(stored.evaluated_at.is_some());
    }

    /// Test Case: The evaluator name is stored when supplied
    #[tokio::test]
    #[serial]
    async fn evaluate_records_evaluator_name() {
        let (app, app_state) = make_test_app().await;
        let submission = pending_submission(app_state.db()).await;

        let req = json_request(
            "POST",
            "/api/evaluate",
            json!({
                "submission_id": submission.id,
                "max_marks": 50,
                "evaluator_name": "Dr. Smith"
            }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let stored = SubmissionModel::find_by_id(app_state.db(), &submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.evaluated_by.as_deref(), Some("Dr. Smith"));
        assert_eq!(stored.max_marks, Some(50));
    }

    /// Test Case: A submission can only be evaluated once
    #[tokio::test]
    #[serial]
    async fn evaluate_twice_conflicts() {
        let grader = StubGrader::replying("MARKS: 15\nFEEDBACK: Fine.");
        let (app, app_state) = make_test_app_with_grader(grader.clone()).await;
        let submission = pending_submission(app_state.db()).await;
        let body = json!({ "submission_id": submission.id, "max_marks": 20 });

        let first = app
            .clone()
            .oneshot(json_request("POST", "/api/evaluate", body.clone()))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(json_request("POST", "/api/evaluate", body))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let json = body_json(second).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Submission has already been evaluated");

        // The grader is not consulted for an evaluated submission.
        assert_eq!(grader.prompts().len(), 1);
    }

    /// Test Case: Unknown submission ids are reported as missing
    #[tokio::test]
    #[serial]
    async fn evaluate_unknown_submission() {
        let grader = StubGrader::replying("MARKS: 15\nFEEDBACK: Fine.");
        let (app, _) = make_test_app_with_grader(grader.clone()).await;

        let req = json_request(
            "POST",
            "/api/evaluate",
            json!({ "submission_id": "does-not-exist", "max_marks": 20 }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "Submission not found");
        assert!(grader.prompts().is_empty());
    }

    /// Test Case: Scores above the maximum are capped
    #[tokio::test]
    #[serial]
    async fn evaluate_caps_marks_at_maximum() {
        let grader = StubGrader::replying("MARKS: 99\nFEEDBACK: Outstanding.");
        let (app, app_state) = make_test_app_with_grader(grader).await;
        let submission = pending_submission(app_state.db()).await;

        let req = json_request(
            "POST",
            "/api/evaluate",
            json!({ "submission_id": submission.id, "max_marks": 20 }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["data"]["marks"], 20);
        assert_eq!(json["data"]["feedback"], "Outstanding.");
    }

    /// Test Case: A reply without a score stores nothing
    #[tokio::test]
    #[serial]
    async fn evaluate_reply_without_score() {
        let grader = StubGrader::replying("I am unable to grade this document.");
        let (app, app_state) = make_test_app_with_grader(grader).await;
        let submission = pending_submission(app_state.db()).await;

        let req = json_request(
            "POST",
            "/api/evaluate",
            json!({ "submission_id": submission.id, "max_marks": 20 }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            body_json(response).await["message"],
            "Grading response did not contain a score"
        );

        let stored = SubmissionModel::find_by_id(app_state.db(), &submission.id)
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.is_evaluated());
        assert_eq!(stored.marks, None);
    }

    /// Test Case: Grading backend failures leave the submission pending
    #[tokio::test]
    #[serial]
    async fn evaluate_grader_failure() {
        let (app, app_state) = make_test_app_with_grader(StubGrader::failing()).await;
        let submission = pending_submission(app_state.db()).await;

        let req = json_request(
            "POST",
            "/api/evaluate",
            json!({ "submission_id": submission.id, "max_marks": 20 }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["message"], "Error evaluating assignment");

        let stored = SubmissionModel::find_by_id(app_state.db(), &submission.id)
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.is_evaluated());
    }

    /// Test Case: Invalid request bodies are rejected before grading
    #[tokio::test]
    #[serial]
    async fn evaluate_validation() {
        let grader = StubGrader::replying("MARKS: 1\nFEEDBACK: x");
        let (app, app_state) = make_test_app_with_grader(grader.clone()).await;
        let submission = pending_submission(app_state.db()).await;

        let zero_marks = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/evaluate",
                json!({ "submission_id": submission.id, "max_marks": 0 }),
            ))
            .await
            .unwrap();
        assert_eq!(zero_marks.status(), StatusCode::BAD_REQUEST);
        let json = body_json(zero_marks).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "max_marks must be at least 1");

        let empty_id = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/evaluate",
                json!({ "submission_id": "", "max_marks": 10 }),
            ))
            .await
            .unwrap();
        assert_eq!(empty_id.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(empty_id).await["message"], "submission_id is required");

        let missing_marks = app
            .oneshot(json_request(
                "POST",
                "/api/evaluate",
                json!({ "submission_id": submission.id }),
            ))
            .await
            .unwrap();
        assert!(missing_marks.status().is_client_error());

        assert!(grader.prompts().is_empty());
    }

    /// Test Case: The prompt carries at most the configured number of characters
    #[tokio::test]
    #[serial]
    async fn evaluate_truncates_prompt_excerpt() {
        AppConfig::set_llm_prompt_char_limit(10);
        let grader = StubGrader::replying("MARKS: 5\nFEEDBACK: Short.");
        let (app, app_state) = make_test_app_with_grader(grader.clone()).await;
        let submission = pending_submission(app_state.db()).await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/evaluate",
                json!({ "submission_id": submission.id, "max_marks": 10 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let prompts = grader.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].user.contains("out of 10 marks"));
        assert!(prompts[0].user.contains("Assignment Content:\nName: Jane\n"));
        assert!(!prompts[0].user.contains("CS2020123"));

        AppConfig::reset();
    }
}
