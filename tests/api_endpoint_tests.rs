//! API endpoint tests
//!
//! Drive the full router (middleware included) through `oneshot` and
//! check status codes, bodies and the problem-details envelope.

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use cover_vault::{api::create_router, ApplicationBuilder, Config};

const BOUNDARY: &str = "cover-vault-test-boundary";

/// Router over a fresh temp upload directory
async fn setup_app(max_upload_bytes: u64) -> (Router, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    // Resolved up front: some platforms keep temp dirs behind a symlink
    let config = Config {
        upload_dir: temp_dir.path().canonicalize().unwrap(),
        max_upload_bytes: Some(max_upload_bytes),
        ..Config::default()
    };

    let state = ApplicationBuilder::new(config)
        .build()
        .await
        .expect("Failed to build application");

    (create_router(state), temp_dir)
}

fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/upload-cover")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(data) => builder
            .header("content-type", "application/json")
            .body(Body::from(data.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

fn stored_files(dir: &TempDir) -> Vec<String> {
    std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let (app, _dir) = setup_app(1024).await;

    let (status, body) = send(&app, json_request(Method::GET, "/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "cover_vault");
}

#[tokio::test]
async fn test_upload_jpeg_success() {
    let (app, dir) = setup_app(1024).await;
    let data = b"\xff\xd8\xff\xe0 jpeg payload";

    let (status, body) = send(
        &app,
        upload_request(multipart_body("file", "cover.png", "image/png", data)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "File uploaded securely");

    // Extension follows the content, not the declared name
    let filename = body["filename"].as_str().unwrap();
    assert!(filename.ends_with(".jpg"));
    assert!(!filename.contains("cover"));

    assert_eq!(stored_files(&dir), vec![filename.to_string()]);
    assert_eq!(std::fs::read(dir.path().join(filename)).unwrap(), data);
}

#[tokio::test]
async fn test_upload_uses_first_file_field_when_not_named_file() {
    let (app, dir) = setup_app(1024).await;

    let (status, body) = send(
        &app,
        upload_request(multipart_body("cover", "doc.pdf", "application/pdf", b"%PDF-1.7")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["filename"].as_str().unwrap().ends_with(".pdf"));
    assert_eq!(stored_files(&dir).len(), 1);
}

#[tokio::test]
async fn test_upload_invalid_type() {
    let (app, dir) = setup_app(1024).await;

    let (status, body) = send(
        &app,
        upload_request(multipart_body("file", "photo.jpg", "image/jpeg", b"fake content")),
    )
    .await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["type"], "/errors/unsupported-media-type");
    assert_eq!(body["status"], 415);
    assert!(stored_files(&dir).is_empty());
}

#[tokio::test]
async fn test_upload_too_large() {
    let (app, dir) = setup_app(16).await;
    let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
    data.resize(17, b'x');

    let (status, body) = send(
        &app,
        upload_request(multipart_body("file", "big.png", "image/png", &data)),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["type"], "/errors/file-too-large");
    assert_eq!(body["title"], "Payload Too Large");
    assert!(stored_files(&dir).is_empty());
}

#[tokio::test]
async fn test_upload_over_body_limit_is_too_large() {
    let (app, dir) = setup_app(16).await;
    let data = vec![b'x'; 2 * 1024 * 1024];

    let (status, body) = send(
        &app,
        upload_request(multipart_body("file", "huge.bin", "image/png", &data)),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["type"], "/errors/file-too-large");
    assert!(stored_files(&dir).is_empty());
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let (app, _dir) = setup_app(1024).await;
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nhello\r\n--{b}--\r\n",
        b = BOUNDARY
    );

    let (status, problem) = send(&app, upload_request(body.into_bytes())).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(problem["type"], "/errors/validation");
}

#[tokio::test]
async fn test_problem_carries_request_id_and_instance() {
    let (app, _dir) = setup_app(1024).await;
    let request = Request::builder()
        .uri("/items/999")
        .header("x-request-id", "trace-me-42")
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()["x-request-id"], "trace-me-42");
    assert_eq!(
        response.headers()["content-type"],
        "application/problem+json"
    );

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let problem: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        problem,
        json!({
            "type": "/errors/not-found",
            "title": "Not Found",
            "status": 404,
            "detail": "Item not found",
            "correlation_id": "trace-me-42",
            "instance": "/items/999",
        })
    );
}

#[tokio::test]
async fn test_items_flow() {
    let (app, _dir) = setup_app(1024).await;

    let (status, created) = send(&app, json_request(Method::POST, "/items?name=widget", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created, json!({"id": 1, "name": "widget"}));

    let (status, fetched) = send(&app, json_request(Method::GET, "/items/1", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, _) = send(&app, json_request(Method::GET, "/items/not-a-number", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_item_name_validation() {
    let (app, _dir) = setup_app(1024).await;
    let long_name = "x".repeat(101);

    for uri in [
        "/items?name=".to_string(),
        "/items?name=%20%20".to_string(),
        format!("/items?name={}", long_name),
    ] {
        let (status, problem) = send(&app, json_request(Method::POST, &uri, None)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);
        assert_eq!(problem["detail"], "Name must be between 1 and 100 characters");
    }

    let (status, _) = send(&app, json_request(Method::POST, "/items", None)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_quotes_flow() {
    let (app, _dir) = setup_app(1024).await;

    let (status, created) = send(
        &app,
        json_request(
            Method::POST,
            "/quotes",
            Some(json!({"text": "  So it goes.  ", "author": "Kurt Vonnegut", "book": "Slaughterhouse-Five"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], 1);
    assert_eq!(created["text"], "So it goes.");
    assert!(created["created_date"].is_string());

    let (status, list) = send(&app, json_request(Method::GET, "/quotes", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, by_book) = send(
        &app,
        json_request(Method::GET, "/quotes/book/Slaughterhouse-Five", None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_book[0]["author"], "Kurt Vonnegut");

    let (status, problem) = send(
        &app,
        json_request(Method::GET, "/quotes/book/Dune'%20OR%201=1", None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(problem["detail"], "No quotes found for book: Dune' OR 1=1");

    let (status, deleted) = send(&app, json_request(Method::DELETE, "/quotes/1", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Quote deleted");
    assert_eq!(deleted["quote"]["id"], 1);

    let (status, problem) = send(&app, json_request(Method::GET, "/quotes/1", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(problem["detail"], "Quote not found");
}

#[tokio::test]
async fn test_quote_validation() {
    let (app, _dir) = setup_app(1024).await;

    let cases = [
        json!({"text": "   ", "author": "A", "book": "B"}),
        json!({"text": "T", "author": "A", "book": "B", "extra": true}),
        json!({"text": "T", "author": "A"}),
        json!({"text": "x".repeat(2001), "author": "A", "book": "B"}),
    ];

    for body in cases {
        let (status, problem) = send(&app, json_request(Method::POST, "/quotes", Some(body))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(problem["type"], "/errors/validation");
    }

    let (status, list) = send(&app, json_request(Method::GET, "/quotes", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_route_is_problem() {
    let (app, _dir) = setup_app(1024).await;

    let (status, problem) = send(&app, json_request(Method::GET, "/nope", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(problem["instance"], "/nope");
}

#[tokio::test]
async fn test_wrong_method_is_problem() {
    let (app, dir) = setup_app(1024).await;

    for (method, uri) in [
        (Method::GET, "/upload-cover"),
        (Method::PUT, "/quotes/1"),
        (Method::DELETE, "/items"),
    ] {
        let response = app
            .clone()
            .oneshot(json_request(method, uri, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers()["content-type"],
            "application/problem+json"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let problem: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(problem["type"], "/errors/method-not-allowed");
        assert_eq!(problem["status"], 405);
        assert_eq!(problem["instance"], uri);
    }

    assert!(stored_files(&dir).is_empty());
}
