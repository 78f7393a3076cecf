#[cfg(test)]
mod tests {
    use crate::helpers::app::make_test_app;
    use crate::helpers::fixtures::{body_json, json_request};
    use axum::http::StatusCode;
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;
    use util::config::AppConfig;

    /// Test Case: Configured admin credentials are accepted
    #[tokio::test]
    #[serial]
    async fn login_with_admin_credentials() {
        AppConfig::set_admin_credentials("admin", "admin123");
        let (app, _) = make_test_app().await;

        let req = json_request(
            "POST",
            "/api/login",
            json!({ "username": "admin", "password": "admin123" }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Login successful");
        assert_eq!(json["data"]["username"], "admin");
        assert_eq!(json["data"]["role"], "admin");
        assert!(json["data"]["full_name"].as_str().is_some());

        AppConfig::reset();
    }

    /// Test Case: Wrong password is rejected with 401
    #[tokio::test]
    #[serial]
    async fn login_with_wrong_password() {
        AppConfig::set_admin_credentials("admin", "admin123");
        let (app, _) = make_test_app().await;

        let req = json_request(
            "POST",
            "/api/login",
            json!({ "username": "admin", "password": "nope" }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid credentials");
        assert!(json["data"].is_null());

        AppConfig::reset();
    }

    /// Test Case: Credentials come from configuration
    #[tokio::test]
    #[serial]
    async fn login_uses_configured_credentials() {
        AppConfig::set_admin_credentials("marker", "s3cret");
        let (app, _) = make_test_app().await;

        let default_pair = json_request(
            "POST",
            "/api/login",
            json!({ "username": "admin", "password": "admin123" }),
        );
        let response = app.clone().oneshot(default_pair).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let configured_pair = json_request(
            "POST",
            "/api/login",
            json!({ "username": "marker", "password": "s3cret" }),
        );
        let response = app.oneshot(configured_pair).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["username"], "marker");

        AppConfig::reset();
    }

    /// Test Case: Empty fields fail validation
    #[tokio::test]
    #[serial]
    async fn login_with_empty_username() {
        let (app, _) = make_test_app().await;

        let req = json_request(
            "POST",
            "/api/login",
            json!({ "username": "", "password": "admin123" }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Username is required");
    }
}
