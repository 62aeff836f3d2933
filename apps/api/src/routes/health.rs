use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "talent-match-api"
    }))
}

/// GET /health/ready
/// Probes the employee attribute store. 503 when it cannot be reached.
pub async fn readiness_handler(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.store.healthcheck().await?;
    Ok(Json(json!({ "status": "ready" })))
}
