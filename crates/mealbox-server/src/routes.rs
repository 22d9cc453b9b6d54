//! HTTP routes.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use mealbox_common::error::{MealboxError, Result};
use mealbox_common::types::Month;
use mealbox_planner::plan::MonthlyPlan;
use serde_json::{Value, json};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

use crate::service::PlanService;

/// Text served on `GET /`.
pub const HOME_TEXT: &str = "Server running. Use POST /api/generate_monthly_plan with {'month':4}.";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    service: Arc<dyn PlanService>,
}

impl AppState {
    /// Wraps a plan service for sharing across requests.
    pub fn new(service: impl PlanService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Builds the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/api/generate_monthly_plan", post(generate_monthly_plan))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Error rendered as `{"error": ...}`.
#[derive(Debug)]
pub struct ApiError(MealboxError);

impl From<MealboxError> for ApiError {
    fn from(err: MealboxError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            tracing::warn!(error = %self.0, "rejected request");
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!(error = %self.0, "plan generation failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

async fn home() -> &'static str {
    HOME_TEXT
}

async fn generate_monthly_plan(
    State(state): State<AppState>,
    body: Bytes,
) -> std::result::Result<Json<MonthlyPlan>, ApiError> {
    let request_id = Uuid::new_v4();
    let month = parse_month(&body)?;
    tracing::info!(%request_id, month = month.number(), "generating monthly plan");

    let service = Arc::clone(&state.service);
    let plan = tokio::task::spawn_blocking(move || service.monthly_plan(month))
        .await
        .map_err(|e| MealboxError::Internal {
            message: e.to_string(),
        })??;

    tracing::info!(%request_id, shortage_days = plan.shortage_days(), "monthly plan ready");
    Ok(Json(plan))
}

/// Extracts the requested month from a request body.
///
/// An empty body, a missing `month`, or `"month": null` all mean month 1.
///
/// # Errors
///
/// Returns [`MealboxError::InvalidRequest`] for a body that is not a JSON
/// object or a `month` that is not an integral number, and
/// [`MealboxError::InvalidMonth`] for a month outside 1..=12.
pub fn parse_month(body: &[u8]) -> Result<Month> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Month::default());
    }
    let value: Value = serde_json::from_slice(body).map_err(|e| MealboxError::InvalidRequest {
        message: format!("body is not valid JSON: {e}"),
    })?;
    let Value::Object(fields) = value else {
        return Err(MealboxError::InvalidRequest {
            message: "body must be a JSON object".to_string(),
        });
    };
    match fields.get("month") {
        None | Some(Value::Null) => Ok(Month::default()),
        Some(month) => {
            let number = month
                .as_i64()
                .or_else(|| month.as_f64().and_then(integral_float))
                .ok_or_else(|| MealboxError::InvalidRequest {
                    message: format!("month must be an integer, got {month}"),
                })?;
            Month::new(number)
        }
    }
}

// `4.0` names month 4. Out-of-range values saturate and `Month::new` rejects them.
#[allow(clippy::cast_possible_truncation)]
fn integral_float(n: f64) -> Option<i64> {
    (n.is_finite() && n.fract() == 0.0).then_some(n as i64)
}
