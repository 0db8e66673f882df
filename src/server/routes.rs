use crate::errors::CalcError;
use crate::models::range::compute_range;
use crate::models::VolatilityMode;
use crate::server::form::{self, CalculateRequest, FieldSpec, FormDescriptor, RangeRow, SampleCalculation};
use crate::state::{AppState, CounterSnapshot};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use portable_atomic::Ordering;
use std::sync::Arc;

#[derive(Debug, serde::Serialize)]
pub struct CalculateResponse {
    #[serde(flatten)]
    pub row: RangeRow,
    pub calculated_at: String,
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

/// GET /api/form -- full form descriptor with the per-mode field table
pub async fn get_form() -> Json<FormDescriptor> {
    Json(form::form_descriptor())
}

/// GET /api/form/{mode} -- label, help and step for one volatility mode
pub async fn get_field(Path(mode): Path<String>) -> Result<Json<&'static FieldSpec>, Response> {
    match VolatilityMode::parse(&mode) {
        Some(m) => Ok(Json(form::field_spec(m))),
        None => Err(error_body(
            StatusCode::NOT_FOUND,
            format!("unknown volatility mode: {mode}"),
        )),
    }
}

/// POST /api/calculate -- one explicit "Calculate" action, one core invocation
pub async fn post_calculate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<CalculateResponse>, Response> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "malformed calculate request");
        error_body(rejection.status(), rejection.body_text())
    })?;

    let name = req.display_name();

    match compute_range(req.price, req.volatility, req.volatility_mode) {
        Ok(result) => {
            state.counters.calculations_served.fetch_add(1, Ordering::Relaxed);
            tracing::info!(
                stock = name,
                price = req.price,
                mode = %req.volatility_mode,
                decimal_iv = result.decimal_iv,
                sd_move = result.std_dev_move,
                "range calculated"
            );
            Ok(Json(CalculateResponse {
                row: RangeRow::new(name, &result),
                calculated_at: chrono::Utc::now().to_rfc3339(),
            }))
        }
        Err(e) => {
            match &e {
                CalcError::InvalidInput { reason } => {
                    state.counters.calculations_rejected.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(stock = name, reason = %reason, "calculation refused");
                }
                _ => {
                    state.counters.numeric_faults.fetch_add(1, Ordering::Relaxed);
                    tracing::error!(stock = name, error = %e, "calculation failed");
                }
            }
            Err(e.into_response())
        }
    }
}

/// GET /api/samples -- the IV and VIX worked examples
pub async fn get_samples() -> Result<Json<Vec<SampleCalculation>>, CalcError> {
    form::sample_calculations().map(Json)
}

/// GET /api/counters -- request counters (lock-free reads)
pub async fn get_counters(State(state): State<Arc<AppState>>) -> Json<CounterSnapshot> {
    Json(state.counters.snapshot())
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
