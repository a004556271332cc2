use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::fault::{FaultLineResult, FaultQuery, DEFAULT_RADIUS_KM};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub(super) struct ApiError(StatusCode, ApiErrorBody);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(self.1)).into_response()
    }
}

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    ApiError(
        status,
        ApiErrorBody {
            message: message.into(),
            error: None,
        },
    )
}

fn api_error_with_cause(
    status: StatusCode,
    message: impl Into<String>,
    cause: impl Into<String>,
) -> ApiError {
    ApiError(
        status,
        ApiErrorBody {
            message: message.into(),
            error: Some(cause.into()),
        },
    )
}

// ─── GET /api/fault-lines ────────────────────────────────────────

#[derive(Deserialize)]
pub struct FaultLinesQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius: Option<f64>,
}

pub async fn fault_lines(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FaultLinesQuery>,
) -> Result<Json<Vec<FaultLineResult>>, Response> {
    let start = Instant::now();

    let (lat, lng) = match (params.lat, params.lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => {
            return Err(
                api_error(StatusCode::BAD_REQUEST, "Provide 'lat' and 'lng' parameters")
                    .into_response(),
            )
        }
    };
    let radius = params.radius.unwrap_or(DEFAULT_RADIUS_KM);

    // All input validation happens here, before any network call.
    let query = FaultQuery::new(lat, lng, radius)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()).into_response())?;

    let outcome = state
        .resolver
        .resolve_widened(&query.point, query.radius_km)
        .map_err(|e| {
            api_error_with_cause(StatusCode::BAD_GATEWAY, "Fault lookup failed", e.to_string())
                .into_response()
        })?;

    let elapsed = start.elapsed();
    eprintln!(
        "[{}] GET /api/fault-lines lat={} lng={} radius={} -> {} results, {} skipped{} ({:.1}ms)",
        Utc::now().format("%H:%M:%S"),
        lat,
        lng,
        outcome.radius_km,
        outcome.results.len(),
        outcome.skipped,
        if outcome.widened { ", widened" } else { "" },
        elapsed.as_secs_f64() * 1000.0,
    );

    Ok(Json(outcome.results))
}

// ─── GET /api/health ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
