//! Cross-rate routes.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tracing::info;

use super::query_params;
use crate::AppState;
use rategate_shared::AppError;

/// Creates the cross-rate routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/rates", get(get_rates))
}

/// Query parameters for cross rates.
#[derive(Debug, Deserialize)]
pub struct RatesQuery {
    /// Comma separated currency codes, e.g. `USD,GBP,EUR`.
    pub currencies: Option<String>,
}

/// GET `/rates` - Cross rates for every ordered pair of the given currencies.
async fn get_rates(
    State(state): State<AppState>,
    query: Result<Query<RatesQuery>, QueryRejection>,
) -> Response {
    let query = match state.ensure_running().and_then(|()| query_params(query)) {
        Ok(query) => query,
        Err(e) => return state.error_responder.respond(&e),
    };

    let result = tokio::select! {
        biased;
        () = state.shutdown.cancelled() => Err(AppError::ServiceUnavailable),
        result = state.currency_service.cross_rates(query.currencies.as_deref()) => result,
    };

    match result {
        Ok(rates) => {
            info!(pairs = rates.len(), "Cross rates calculated");
            (StatusCode::OK, Json(rates)).into_response()
        }
        Err(e) => state.error_responder.respond(&e),
    }
}
