//! Cross rates, currency exchange and the sources they read from.

pub mod conversion;
pub mod exchange;
pub mod provider;
pub mod rates;
pub mod service;
pub mod store;

#[cfg(test)]
mod props;

pub use conversion::{divide, multiply, to_fixed};
pub use exchange::{ExchangeRequest, ExchangeResult};
pub use provider::{RateProvider, RateSnapshot, StaticRateProvider};
pub use rates::{CrossRate, CurrencyCombination, RateTable};
pub use service::CurrencyService;
pub use store::{CurrencyDetails, CurrencyStore};
