//! API route definitions.

use axum::{Router, extract::Query, extract::rejection::QueryRejection};

use crate::AppState;
use rategate_shared::{AppError, AppResult};

pub mod exchange;
pub mod health;
pub mod rates;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(rates::routes())
        .merge(exchange::routes())
}

/// Turns a query-string rejection into `InvalidRequest`, so malformed queries
/// share the JSON error shape.
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))
}
