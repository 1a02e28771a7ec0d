//! Upstream rate sources.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use rategate_shared::{AppError, AppResult};

use super::rates::RateTable;

/// Rates fetched from a provider, all relative to `base`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateSnapshot {
    /// Base currency the rates are expressed in.
    pub base: String,
    /// When the provider published the rates, if it said.
    pub published_at: Option<DateTime<Utc>>,
    /// Currency code to rate.
    pub rates: RateTable,
}

/// Source of base-relative rates.
///
/// Implementations perform no retries and no caching; a failed fetch
/// surfaces immediately.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches rates covering at least `currencies`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::UpstreamFailure` or `AppError::UpstreamTimeout`
    /// when the provider cannot be reached or answers garbage.
    async fn fetch(&self, currencies: &[String]) -> AppResult<RateSnapshot>;
}

/// In-memory provider serving a fixed table.
///
/// Counts fetches so callers can assert whether the upstream was consulted.
#[derive(Debug)]
pub struct StaticRateProvider {
    snapshot: Result<RateSnapshot, AppError>,
    calls: AtomicUsize,
}

impl StaticRateProvider {
    /// Creates a provider answering with `rates` relative to `base`.
    pub fn new<I, S>(base: &str, rates: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        Self {
            snapshot: Ok(RateSnapshot {
                base: base.to_string(),
                published_at: None,
                rates: rates.into_iter().map(|(code, rate)| (code.into(), rate)).collect(),
            }),
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a provider whose every fetch fails with `error`.
    #[must_use]
    pub fn failing(error: AppError) -> Self {
        Self {
            snapshot: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of fetches served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateProvider for StaticRateProvider {
    async fn fetch(&self, _currencies: &[String]) -> AppResult<RateSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.snapshot.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_static_provider_serves_table() {
        let provider = StaticRateProvider::new("USD", [("USD", dec!(1)), ("GBP", dec!(0.743653))]);

        let snapshot = provider.fetch(&["GBP".to_string()]).await.unwrap();
        assert_eq!(snapshot.base, "USD");
        assert_eq!(snapshot.rates.get("GBP"), Some(&dec!(0.743653)));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_failing_provider() {
        let provider = StaticRateProvider::failing(AppError::UpstreamTimeout);

        assert_eq!(
            provider.fetch(&[]).await.unwrap_err(),
            AppError::UpstreamTimeout
        );
        assert_eq!(provider.calls(), 1);
    }
}
