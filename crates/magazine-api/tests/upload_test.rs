//! Upload API integration tests.
//!
//! Run with: `cargo test -p magazine-api --test upload_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::fixtures::{create_test_image, create_test_jpeg, file_form};
use helpers::{
    api_path, create_production_config, setup_test_app, setup_test_app_with,
    setup_test_app_with_config,
};
use image::ImageFormat;
use magazine_api::setup::{build_state, routes};
use magazine_storage::MockStorage;
use serde_json::Value;

#[tokio::test]
async fn test_root_is_up() {
    let app = setup_test_app();

    let response = app.client().get("/").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"], "Magazine API Up and Running");
}

#[tokio::test]
async fn test_health_reports_storage_backend() {
    let app = setup_test_app();

    let response = app.client().get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "local");
}

#[tokio::test]
async fn test_upload_jpeg_stores_all_derivatives() {
    let app = setup_test_app();
    let form = file_form("file", "cover.jpg", create_test_jpeg(), "image/jpeg");

    let response = app
        .client()
        .post(&api_path("/upload"))
        .multipart(form)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let url = body["url"].as_str().expect("url should be a string");

    let id = url
        .strip_prefix("docs_upload/")
        .and_then(|rest| rest.strip_suffix(".jpg"))
        .expect("url should be docs_upload/{id}.jpg");
    assert!(uuid::Uuid::parse_str(id).is_ok());

    let mut expected = vec![
        format!("docs_upload/{}.jpg", id),
        format!("docs_upload/{}.webp", id),
        format!("docs_upload/{}_thumb.jpg", id),
        format!("docs_upload/{}_thumb.webp", id),
    ];
    expected.sort();
    assert_eq!(app.storage.stored_keys(), expected);
}

#[tokio::test]
async fn test_upload_png() {
    let app = setup_test_app();
    let form = file_form(
        "file",
        "art.png",
        create_test_image(120, 60, ImageFormat::Png),
        "image/png",
    );

    let response = app
        .client()
        .post(&api_path("/upload"))
        .multipart(form)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("docs_upload/"));
    assert!(url.ends_with(".png"));
    assert_eq!(app.storage.stored_keys().len(), 4);
}

#[tokio::test]
async fn test_upload_without_file_is_bad_request() {
    let app = setup_test_app();
    let form = MultipartForm::new().add_text("title", "Spring issue");

    let response = app
        .client()
        .post(&api_path("/upload"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code().as_u16(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "no image uploaded");
    assert!(app.storage.upload_attempts().is_empty());
}

#[tokio::test]
async fn test_upload_file_in_other_field_is_ignored() {
    let app = setup_test_app();
    let form = file_form("avatar", "me.jpg", create_test_jpeg(), "image/jpeg");

    let response = app
        .client()
        .post(&api_path("/upload"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code().as_u16(), 400);
    assert!(app.storage.upload_attempts().is_empty());
}

#[tokio::test]
async fn test_non_multipart_body_is_bad_request() {
    let app = setup_test_app();

    let response = app
        .client()
        .post(&api_path("/upload"))
        .json(&serde_json::json!({ "file": "cover.jpg" }))
        .await;

    assert_eq!(response.status_code().as_u16(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "no image uploaded");
}

#[tokio::test]
async fn test_unsupported_extension_is_rejected() {
    let app = setup_test_app();
    let form = file_form("file", "anim.gif", b"GIF89a".to_vec(), "image/gif");

    let response = app
        .client()
        .post(&api_path("/upload"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code().as_u16(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "EXTENSION_MISMATCH");
    assert_eq!(body["error"], "file extension not supported");
    assert!(body["details"].as_str().unwrap().contains(".gif"));
    assert!(app.storage.upload_attempts().is_empty());
}

#[tokio::test]
async fn test_production_hides_error_details() {
    let app = setup_test_app_with_config(MockStorage::new(), create_production_config());
    let form = file_form("file", "anim.gif", b"GIF89a".to_vec(), "image/gif");

    let response = app
        .client()
        .post(&api_path("/upload"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code().as_u16(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "EXTENSION_MISMATCH");
    assert_eq!(body["error"], "file extension not supported");
    assert!(body.get("details").is_none());
    assert!(body.get("error_type").is_none());
}

#[test]
fn test_production_rejects_wildcard_cors() {
    let mut config = create_production_config();
    config.0.base.cors_origins = vec!["*".to_string()];
    let state = build_state(config.clone(), std::sync::Arc::new(MockStorage::new()));

    assert!(routes::setup_routes(&config, state).is_err());
}

#[tokio::test]
async fn test_uppercase_extension_is_rejected() {
    let app = setup_test_app();
    let form = file_form("file", "COVER.JPG", create_test_jpeg(), "image/jpeg");

    let response = app
        .client()
        .post(&api_path("/upload"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code().as_u16(), 400);
    assert!(app.storage.upload_attempts().is_empty());
}

#[tokio::test]
async fn test_first_file_part_wins() {
    let app = setup_test_app();
    let form = MultipartForm::new()
        .add_part(
            "file",
            Part::bytes(create_test_jpeg())
                .file_name("first.jpg")
                .mime_type("image/jpeg"),
        )
        .add_part(
            "file",
            Part::bytes(b"GIF89a".to_vec())
                .file_name("second.gif")
                .mime_type("image/gif"),
        );

    let response = app
        .client()
        .post(&api_path("/upload"))
        .multipart(form)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["url"].as_str().unwrap().ends_with(".jpg"));
}

#[tokio::test]
async fn test_storage_failure_is_server_error_and_rolls_back() {
    let app = setup_test_app_with(MockStorage::new().fail_on("_thumb"), 10 << 20);
    let form = file_form("file", "cover.jpg", create_test_jpeg(), "image/jpeg");

    let response = app
        .client()
        .post(&api_path("/upload"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code().as_u16(), 500);
    let body: Value = response.json();
    assert_eq!(body["code"], "STORAGE_ERROR");
    assert!(body.get("details").is_none());
    assert!(app.storage.stored_keys().is_empty());
}

#[tokio::test]
async fn test_body_over_limit_is_rejected() {
    let app = setup_test_app_with(MockStorage::new(), 1024);
    let form = file_form("file", "big.jpg", vec![0u8; 8 * 1024], "image/jpeg");

    let response = app
        .client()
        .post(&api_path("/upload"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code().as_u16(), 413);
    assert!(app.storage.upload_attempts().is_empty());
}

#[tokio::test]
async fn test_signed_url() {
    let app = setup_test_app();

    let response = app
        .client()
        .get(&api_path("/upload/signed-url"))
        .add_query_param("key", "docs_upload/a.jpg")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["key"], "docs_upload/a.jpg");
    assert_eq!(
        body["url"],
        "https://storage.test/presigned/docs_upload/a.jpg?expires=60"
    );
}

#[tokio::test]
async fn test_signed_url_requires_key() {
    let app = setup_test_app();

    let response = app.client().get(&api_path("/upload/signed-url")).await;

    assert_eq!(response.status_code().as_u16(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = setup_test_app();

    let response = app
        .client()
        .get("/health")
        .add_header("X-Request-ID", "issue-42")
        .await;

    assert_eq!(response.header("x-request-id"), "issue-42");
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let app = setup_test_app();

    let response = app.client().get("/").await;

    let request_id = response.header("x-request-id");
    let request_id = request_id.to_str().unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}
