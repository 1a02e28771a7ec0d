//! Currency exchange routes.

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

/// Creates the exchange routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/exchange", get(get_exchange))
}

/// Query parameters for an exchange.
#[derive(Debug, Deserialize)]
pub struct ExchangeQuery {
    /// Source currency code.
    pub from: Option<String>,
    /// Target currency code.
    pub to: Option<String>,
    /// Amount of the source currency, as a decimal string.
    pub amount: Option<String>,
}

/// GET `/exchange` - Convert an amount between two supported currencies.
async fn get_exchange(
    State(state): State<AppState>,
    query: Result<Query<ExchangeQuery>, QueryRejection>,
) -> Response {
    let result = state.ensure_running().and_then(|()| {
        let query = query_params(query)?;
        state.currency_service.exchange(
            query.from.as_deref(),
            query.to.as_deref(),
            query.amount.as_deref(),
        )
    });

    match result {
        Ok(exchange) => {
            info!(
                from = %exchange.from,
                to = %exchange.to,
                amount = %exchange.amount,
                "Exchange calculated"
            );
            (StatusCode::OK, Json(exchange)).into_response()
        }
        Err(e) => state.error_responder.respond(&e),
    }
}
