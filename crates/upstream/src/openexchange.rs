//! openexchangerates.org client.
//!
//! Fetches `latest.json` for a fixed base currency. The client performs a
//! single request per fetch with no retries and no caching.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use rategate_core::currency::{RateProvider, RateSnapshot};
use rategate_shared::{AppError, AppResult, ProviderConfig};

const LATEST_PATH: &str = "latest.json";

/// Successful `latest.json` payload.
#[derive(Debug, Deserialize)]
struct LatestResponse {
    base: String,
    #[serde(default)]
    timestamp: Option<i64>,
    rates: HashMap<String, Decimal>,
}

/// Error payload returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// HTTP-backed rate provider for openexchangerates.org.
#[derive(Debug, Clone)]
pub struct OpenExchangeClient {
    client: reqwest::Client,
    url: String,
    app_id: String,
    base: String,
}

impl OpenExchangeClient {
    /// Creates a client for `api_url` (e.g. `https://openexchangerates.org/api/`).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the HTTP client cannot be built.
    pub fn new(api_url: &str, app_id: &str, base: &str, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: format!("{}/{LATEST_PATH}", api_url.trim_end_matches('/')),
            app_id: app_id.to_string(),
            base: base.trim().to_uppercase(),
        })
    }

    /// Creates a client from provider configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the HTTP client cannot be built.
    pub fn from_config(config: &ProviderConfig) -> AppResult<Self> {
        Self::new(
            &config.api_url,
            &config.app_id,
            &config.base_currency,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Endpoint the client fetches from, without credentials.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Base currency requested from the provider.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }
}

#[async_trait]
impl RateProvider for OpenExchangeClient {
    #[instrument(skip_all, fields(requested = currencies.len()))]
    async fn fetch(&self, currencies: &[String]) -> AppResult<RateSnapshot> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("app_id", self.app_id.as_str()), ("base", self.base.as_str())])
            .send()
            .await
            .map_err(upstream_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.description.or(body.message))
                .unwrap_or_else(|| status.to_string());
            warn!(status = %status, detail = %detail, "Rate provider rejected request");
            return Err(AppError::UpstreamFailure(format!(
                "status {}: {detail}",
                status.as_u16()
            )));
        }

        let body: LatestResponse = response.json().await.map_err(upstream_error)?;

        if body.base != self.base {
            warn!(expected = %self.base, actual = %body.base, "Rate provider answered with another base");
        }

        let rates = currencies
            .iter()
            .filter_map(|code| body.rates.get(code).map(|rate| (code.clone(), *rate)))
            .collect::<HashMap<_, _>>();

        debug!(
            url = %self.url,
            base = %self.base,
            found = rates.len(),
            "Fetched currency rates"
        );

        Ok(RateSnapshot {
            base: body.base,
            published_at: body
                .timestamp
                .and_then(|ts| DateTime::from_timestamp(ts, 0)),
            rates,
        })
    }
}

fn upstream_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::UpstreamTimeout
    } else {
        AppError::UpstreamFailure(err.without_url().to_string())
    }
}
