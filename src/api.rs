// 🌐 HTTP Transport - JSON API in front of the evaluator
// Routes: POST /calculate, GET /health, GET / (calculator page)

use crate::evaluator::{CalculationResult, Evaluator};
use crate::number::ResultValue;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::any::Any;
use thiserror::Error;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

/// Shared application state
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub evaluator: Evaluator,
}

impl AppState {
    pub fn new(evaluator: Evaluator) -> Self {
        AppState { evaluator }
    }
}

// ============================================================================
// Request parsing
// ============================================================================

/// Request-shape problems caught before the evaluator is involved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("No data provided")]
    NoData,

    #[error("Please fill all fields")]
    MissingFields,
}

/// Body of `POST /calculate`, with every field already trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculateRequest {
    pub num1: String,
    pub num2: String,
    pub operator: String,
}

impl CalculateRequest {
    /// Parse a raw JSON body.
    ///
    /// An empty body, malformed JSON, a non-object or `{}` count as no data.
    /// Fields may be strings or JSON numbers; anything else counts as blank.
    pub fn from_body(body: &[u8]) -> Result<Self, RequestError> {
        let payload = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) if !map.is_empty() => map,
            _ => return Err(RequestError::NoData),
        };

        let request = CalculateRequest {
            num1: field(&payload, "num1"),
            num2: field(&payload, "num2"),
            operator: field(&payload, "operator"),
        };

        if request.num1.is_empty() || request.num2.is_empty() || request.operator.is_empty() {
            return Err(RequestError::MissingFields);
        }

        Ok(request)
    }
}

fn field(payload: &Map<String, Value>, name: &str) -> String {
    match payload.get(name) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

// ============================================================================
// Response bodies
// ============================================================================

/// Outcome of an evaluation, success or not
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub success: bool,
    pub result: Option<ResultValue>,
    pub error: Option<String>,
}

impl From<CalculationResult> for CalculateResponse {
    fn from(result: CalculationResult) -> Self {
        match result {
            CalculationResult::Success { value } => CalculateResponse {
                success: true,
                result: Some(value),
                error: None,
            },
            CalculationResult::Failure { error } => CalculateResponse {
                success: false,
                result: None,
                error: Some(error.to_string()),
            },
        }
    }
}

/// Failure that produced no calculation (bad request shape, handler panic)
#[derive(Debug, Serialize)]
struct RejectedResponse {
    success: bool,
    error: String,
}

/// Unknown route
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /calculate - Evaluate one operation
async fn calculate(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match CalculateRequest::from_body(&body) {
        Ok(request) => request,
        Err(err) => {
            tracing::debug!(error = %err, "Rejected calculation request");
            let body = RejectedResponse {
                success: false,
                error: err.to_string(),
            };
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    let result = state
        .evaluator
        .evaluate(&request.num1, &request.num2, &request.operator);

    let status = if result.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    (status, Json(CalculateResponse::from(result))).into_response()
}

/// GET /health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET / - Serve the calculator page
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse { error: "Not found" }))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!(%detail, "API error: handler panicked");

    let body = RejectedResponse {
        success: false,
        error: "Server error".to_string(),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(serve_index))
        .route("/health", get(health_check))
        .route("/calculate", post(calculate))
        .fallback(not_found)
        .with_state(state);

    with_layers(routes)
}

fn with_layers(router: Router) -> Router {
    router
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(handle_panic))
}

// ============================================================================
// TESTS
// ============================================================================
