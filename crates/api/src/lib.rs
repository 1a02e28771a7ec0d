//! HTTP API layer with Axum routes and error responders.
//!
//! This crate provides:
//! - REST API routes for cross rates and exchange
//! - The error-to-response policy
//! - Response types

pub mod errors;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, http::StatusCode};
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use rategate_core::currency::CurrencyService;
use rategate_shared::{AppError, AppResult};

use crate::errors::ErrorResponder;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cross-rate and exchange operations.
    pub currency_service: Arc<CurrencyService>,
    /// Turns errors into HTTP responses.
    pub error_responder: Arc<dyn ErrorResponder>,
    /// Cancelled once the process starts shutting down.
    pub shutdown: CancellationToken,
    /// Base currency of the upstream rates.
    pub base_currency: Arc<str>,
}

impl AppState {
    /// Fails with `ServiceUnavailable` once shutdown has begun.
    pub fn ensure_running(&self) -> AppResult<()> {
        if self.shutdown.is_cancelled() {
            Err(AppError::ServiceUnavailable)
        } else {
            Ok(())
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
