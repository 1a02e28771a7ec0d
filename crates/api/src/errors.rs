//! Error-to-response policy.
//!
//! Handlers never build error responses themselves; they hand every
//! `AppError` to the configured `ErrorResponder`.

use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

use rategate_shared::AppError;

/// Renders an `AppError` as an HTTP response.
pub trait ErrorResponder: Send + Sync {
    /// Builds the response for `error`.
    fn respond(&self, error: &AppError) -> Response;
}

/// Responds with the error's status and a JSON body
/// `{"error": <code>, "message": <text>}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonErrorResponder;

impl ErrorResponder for JsonErrorResponder {
    fn respond(&self, error: &AppError) -> Response {
        let status =
            StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            Json(json!({
                "error": error.error_code(),
                "message": error.to_string()
            })),
        )
            .into_response()
    }
}

/// Logs each error, then delegates to the wrapped responder.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingErrorResponder<R> {
    inner: R,
}

impl<R> LoggingErrorResponder<R> {
    /// Wraps `inner`.
    pub const fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: ErrorResponder> ErrorResponder for LoggingErrorResponder<R> {
    fn respond(&self, err: &AppError) -> Response {
        if err.is_client_error() {
            warn!(code = err.error_code(), error = %err, "Request rejected");
        } else {
            error!(code = err.error_code(), error = %err, "Request failed");
        }
        self.inner.respond(err)
    }
}

/// Builds the responder selected by configuration.
pub fn error_responder(log_errors: bool) -> Arc<dyn ErrorResponder> {
    if log_errors {
        Arc::new(LoggingErrorResponder::new(JsonErrorResponder))
    } else {
        Arc::new(JsonErrorResponder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::EmptyParameter("currencies".into()), StatusCode::BAD_REQUEST)]
    #[case(AppError::CurrencyNotFound("AWG".into()), StatusCode::NOT_FOUND)]
    #[case(AppError::ZeroValue("MRU".into()), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(AppError::UpstreamTimeout, StatusCode::GATEWAY_TIMEOUT)]
    #[case(AppError::ServiceUnavailable, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_json_responder_status(#[case] error: AppError, #[case] status: StatusCode) {
        assert_eq!(JsonErrorResponder.respond(&error).status(), status);
    }

    #[test]
    fn test_logging_responder_keeps_status() {
        let responder = error_responder(true);
        let response = responder.respond(&AppError::RepoCurrencyNotFound("DOGE".into()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
