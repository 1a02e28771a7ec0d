//! Liveness endpoint.
//!
//! Answers from process state only; the upstream provider is not contacted.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `healthy`, or `shutting_down` once the shutdown token is cancelled.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Base currency the upstream rates are quoted in.
    pub base_currency: String,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.shutdown.is_cancelled() {
        "shutting_down"
    } else {
        "healthy"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        base_currency: state.base_currency.to_string(),
    })
}

/// Creates the health route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
