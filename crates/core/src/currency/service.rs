//! Currency service tying validation, sources and calculation together.
//!
//! Both pipelines validate first and fail fast: the rate provider is never
//! called for a malformed currency list, and the store is never read for a
//! malformed exchange request.

use std::sync::Arc;

use rategate_shared::AppResult;

use super::exchange::{self, ExchangeRequest, ExchangeResult};
use super::provider::RateProvider;
use super::rates::{self, CrossRate};
use super::store::CurrencyStore;

/// Currency service for cross-rate and exchange operations.
#[derive(Clone)]
pub struct CurrencyService {
    provider: Arc<dyn RateProvider>,
    store: Arc<dyn CurrencyStore>,
}

impl CurrencyService {
    /// Creates a new currency service.
    #[must_use]
    pub fn new(provider: Arc<dyn RateProvider>, store: Arc<dyn CurrencyStore>) -> Self {
        Self { provider, store }
    }

    /// Computes every ordered cross rate of the delimited `currencies` list.
    ///
    /// # Errors
    ///
    /// - `EmptyParameter` / `InvalidRequest` for a bad list (provider untouched)
    /// - any provider error, unchanged
    /// - `CurrencyNotFound` / `ZeroValue` from the calculation
    pub async fn cross_rates(&self, currencies: Option<&str>) -> AppResult<Vec<CrossRate>> {
        let codes = rates::parse_currency_list(currencies)?;
        let combinations = rates::combinations(&codes);

        let snapshot = self.provider.fetch(&codes).await?;

        rates::cross_rates(&snapshot.rates, &combinations)
    }

    /// Converts `amount` of `from` into `to`.
    ///
    /// # Errors
    ///
    /// - `EmptyParameter`, `AmountNotNumber`, `NegativeAmount` (store untouched)
    /// - `RepoCurrencyNotFound` / `ZeroValue` from the lookup
    pub fn exchange(
        &self,
        from: Option<&str>,
        to: Option<&str>,
        amount: Option<&str>,
    ) -> AppResult<ExchangeResult> {
        let request = ExchangeRequest::parse(from, to, amount)?;
        exchange::exchange(self.store.as_ref(), &request)
    }
}

impl std::fmt::Debug for CurrencyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrencyService").finish_non_exhaustive()
    }
}
