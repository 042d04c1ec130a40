//! Integration tests for the intake preview endpoint

mod common;

use axum::http::StatusCode;
use common::{json, TestApp};

#[tokio::test]
async fn test_preview_complete_form() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/v1/intake/preview",
            r#"{
                "name": "Luca",
                "surname": "Verdi",
                "email": "luca.verdi@example.com",
                "body_weight": "70",
                "height": "175",
                "gender": "male",
                "fat_percentage": "20",
                "measurements": {"waist": "84", "chest": "96"}
            }"#,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let value = json(&body);
    assert_eq!(value["patient"], "Verdi Luca");
    assert_eq!(value["composition"]["composition"]["ffm"], 56.0);
    assert_eq!(value["measurements"]["waist"], 84.0);
    assert_eq!(value["progress_entry"]["bmr"], 1732.0);
    assert_eq!(value["warnings"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_preview_reports_warnings_and_skips_composition() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/v1/intake/preview",
            r#"{
                "name": "Luca",
                "surname": "Verdi",
                "body_weight": "70",
                "fat_percentage": "abc"
            }"#,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let value = json(&body);
    assert!(value["composition"].is_null());
    assert_eq!(value["warnings"][0]["field"], "fat_percentage");
    assert_eq!(value["progress_entry"]["body_weight"], 70.0);
}

#[tokio::test]
async fn test_preview_requires_name() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/v1/intake/preview",
            r#"{"name": "", "surname": "Verdi"}"#,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let value = json(&body);
    assert_eq!(value["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(value["error"]["field"], "name");
}
