//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error kinds.
///
/// Every failure in the rate and exchange pipelines is classified into exactly
/// one of these, so the HTTP boundary can map it to a status deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// A required parameter is missing or blank.
    #[error("Empty parameter: {0}")]
    EmptyParameter(String),

    /// Structurally malformed input (too few codes, duplicates).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Amount does not parse as a decimal number.
    #[error("Amount is not a number: {0}")]
    AmountNotNumber(String),

    /// Amount is below zero.
    #[error("Amount must not be negative: {0}")]
    NegativeAmount(String),

    /// Currency code is absent from the fetched rate table.
    #[error("Unknown currency: {0}")]
    CurrencyNotFound(String),

    /// Currency code is absent from the currency repository.
    #[error("Currency not supported for exchange: {0}")]
    RepoCurrencyNotFound(String),

    /// A rate or precision that must be non-zero is zero.
    #[error("Zero value for currency: {0}")]
    ZeroValue(String),

    /// The upstream rate provider failed.
    #[error("Rate provider failure: {0}")]
    UpstreamFailure(String),

    /// The upstream rate provider did not answer in time.
    #[error("Rate provider timed out")]
    UpstreamTimeout,

    /// The service is shutting down and no longer accepts work.
    #[error("Service is shutting down")]
    ServiceUnavailable,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::EmptyParameter(_)
            | Self::InvalidRequest(_)
            | Self::AmountNotNumber(_)
            | Self::NegativeAmount(_)
            | Self::RepoCurrencyNotFound(_)
            | Self::UpstreamFailure(_) => 400,
            Self::CurrencyNotFound(_) => 404,
            Self::ZeroValue(_) => 422,
            Self::Internal(_) => 500,
            Self::ServiceUnavailable => 503,
            Self::UpstreamTimeout => 504,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyParameter(_) => "EMPTY_PARAMETER",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::AmountNotNumber(_) => "AMOUNT_NOT_NUMBER",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::CurrencyNotFound(_) => "CURRENCY_NOT_FOUND",
            Self::RepoCurrencyNotFound(_) => "REPO_CURRENCY_NOT_FOUND",
            Self::ZeroValue(_) => "ZERO_VALUE",
            Self::UpstreamFailure(_) => "UPSTREAM_FAILURE",
            Self::UpstreamTimeout => "UPSTREAM_TIMEOUT",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true for errors caused by the caller's input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
