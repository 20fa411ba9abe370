#![cfg(feature = "server")]

//! HTTP tests for the calculator API, driven through the real router.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use decimal_calculator::api::{self, AppState};
use decimal_calculator::{CalculationObserver, CalculationRecord, Evaluator};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for oneshot

fn app() -> axum::Router {
    api::router(AppState::default())
}

fn post_calculate(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/calculate")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn read_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&body).expect("Failed to parse JSON")
}

async fn calculate(payload: Value) -> (StatusCode, Value) {
    let response = app()
        .oneshot(post_calculate(payload.to_string()))
        .await
        .unwrap();
    let status = response.status();
    (status, read_json(response).await)
}

#[tokio::test]
async fn test_successful_division() {
    let (status, body) = calculate(json!({"num1": "10", "num2": "4", "operator": "÷"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "result": 2.5, "error": null}));
}

#[tokio::test]
async fn test_integral_result_is_json_integer() {
    let response = app()
        .oneshot(post_calculate(r#"{"num1": "2", "num2": "3", "operator": "+"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let raw = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(raw.to_vec()).unwrap();
    assert!(text.contains(r#""result":5"#), "body was {}", text);
}

#[tokio::test]
async fn test_result_keeps_exact_digits() {
    let response = app()
        .oneshot(post_calculate(r#"{"num1": "1", "num2": "3", "operator": "÷"}"#))
        .await
        .unwrap();

    let raw = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(raw.to_vec()).unwrap();
    assert!(text.contains(r#""result":0.3333333333"#), "body was {}", text);
}

#[tokio::test]
async fn test_fields_are_trimmed() {
    let (status, body) = calculate(json!({"num1": " 6 ", "num2": "\t7", "operator": " × "})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], json!(42));
}

#[tokio::test]
async fn test_evaluation_failures_are_bad_requests() {
    let cases = [
        (json!({"num1": "4", "num2": "0", "operator": "÷"}), "Cannot divide by zero"),
        (json!({"num1": "abc", "num2": "2", "operator": "+"}), "Please enter valid numbers"),
        (json!({"num1": "1", "num2": "2", "operator": "?"}), "Invalid operator: ?"),
        (
            json!({"num1": "79228162514264337593543950335", "num2": "10", "operator": "×"}),
            "An unexpected error occurred",
        ),
    ];

    for (payload, message) in cases {
        let (status, body) = calculate(payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"success": false, "result": null, "error": message}));
    }
}

#[tokio::test]
async fn test_empty_body_is_no_data() {
    for raw in ["", "{}", "null"] {
        let response = app().oneshot(post_calculate(raw)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {:?}", raw);
        assert_eq!(
            read_json(response).await,
            json!({"success": false, "error": "No data provided"})
        );
    }
}

#[tokio::test]
async fn test_blank_field_is_rejected() {
    let (status, body) = calculate(json!({"num1": "1", "num2": "   ", "operator": "+"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "error": "Please fill all fields"}));

    let (status, body) = calculate(json!({"num1": "1", "num2": "2"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please fill all fields");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let request = Request::builder()
        .uri("/does-not-exist")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await, json!({"error": "Not found"}));
}

#[tokio::test]
async fn test_index_serves_calculator_page() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let raw = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&raw).contains("/calculate"));
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({"success": true, "data": "OK"}));
}

struct PanickingObserver;

impl CalculationObserver for PanickingObserver {
    fn calculated(&self, _record: &CalculationRecord) {
        panic!("observer exploded with secret details");
    }
}

#[tokio::test]
async fn test_failing_observer_is_generic_error() {
    let state = AppState::new(Evaluator::with_observer(Arc::new(PanickingObserver)));
    let request = post_calculate(r#"{"num1": "1", "num2": "2", "operator": "+"}"#);

    let response = api::router(state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(
        body,
        json!({"success": false, "result": null, "error": "An unexpected error occurred"})
    );
    assert!(!body.to_string().contains("secret"));
}

#[tokio::test]
async fn test_out_of_range_operand_is_generic_error() {
    let (status, body) = calculate(json!({"num1": "1E400", "num2": "1", "operator": "+"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "An unexpected error occurred");
}
