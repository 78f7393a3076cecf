#[cfg(test)]
mod tests {
    use crate::helpers::app::make_test_app;
    use crate::helpers::fixtures::{body_bytes, get_request};
    use axum::http::{StatusCode, header};
    use db::models::submission::Model as SubmissionModel;
    use serial_test::serial;
    use std::io::{Cursor, Read};
    use tower::ServiceExt;
    use util::spreadsheet::XLSX_CONTENT_TYPE;

    fn sheet_xml(workbook: Vec<u8>) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(workbook)).unwrap();
        let mut xml = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    /// Test Case: The export is an XLSX attachment
    #[tokio::test]
    #[serial]
    async fn export_headers() {
        let (app, _) = make_test_app().await;

        let response = app.oneshot(get_request("/api/export/excel")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            XLSX_CONTENT_TYPE
        );
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=assignment_submissions.xlsx"
        );

        let xml = sheet_xml(body_bytes(response).await);
        assert!(xml.contains("Student Name"));
        assert!(xml.contains("Evaluated Date"));
    }

    /// Test Case: Every submission appears in the sheet
    #[tokio::test]
    #[serial]
    async fn export_contains_submissions() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();

        let graded = SubmissionModel::create(db, "Jane Doe", "CS2020123", "essay.pdf", "text")
            .await
            .unwrap();
        SubmissionModel::record_evaluation(db, &graded.id, 15, 20, "Solid & clear.", "Admin")
            .await
            .unwrap();
        SubmissionModel::create(db, "John Smith", "EE200", "bridges.docx", "text")
            .await
            .unwrap();

        let response = app.oneshot(get_request("/api/export/excel")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let xml = sheet_xml(body_bytes(response).await);
        assert!(xml.contains("Jane Doe"));
        assert!(xml.contains("CS2020123"));
        assert!(xml.contains("John Smith"));
        assert!(xml.contains("bridges.docx"));
        assert!(xml.contains("75.0%"));
        assert!(xml.contains("Solid &amp; clear."));
    }
}
