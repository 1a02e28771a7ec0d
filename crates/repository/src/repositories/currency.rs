//! Currency repository backing the exchange calculator.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;

use rategate_core::currency::{CurrencyDetails, CurrencyStore};
use rategate_shared::{AppError, AppResult, CurrencyConfig};

/// Built-in table: code, decimal precision, rate as a decimal literal.
const BUILTIN_CURRENCIES: [(&str, u32, i64, u32); 5] = [
    ("BEER", 18, 2461, 8),
    ("FLOKI", 18, 1428, 7),
    ("GATE", 18, 687, 2),
    ("USDT", 6, 999, 3),
    ("WBTC", 8, 5_703_722, 2),
];

/// Read-only currency table keyed by upper-case code.
#[derive(Debug, Clone)]
pub struct CurrencyRepository {
    currencies: HashMap<String, CurrencyDetails>,
}

impl CurrencyRepository {
    /// Creates a repository from explicit entries.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, CurrencyDetails)>,
        S: AsRef<str>,
    {
        let currencies = entries
            .into_iter()
            .map(|(code, details)| (code.as_ref().trim().to_uppercase(), details))
            .collect();
        Self { currencies }
    }

    /// Creates a repository holding the built-in token table.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_CURRENCIES
                .iter()
                .map(|&(code, precision, mantissa, scale)| {
                    (code, CurrencyDetails::new(precision, Decimal::new(mantissa, scale)))
                }),
        )
    }

    /// Creates a repository from configuration, falling back to the built-in
    /// table when none is configured.
    #[must_use]
    pub fn from_config(currencies: &HashMap<String, CurrencyConfig>) -> Self {
        if currencies.is_empty() {
            debug!("No currencies configured, using built-in table");
            return Self::builtin();
        }

        Self::new(currencies.iter().map(|(code, config)| {
            (
                code.as_str(),
                CurrencyDetails::new(config.decimal_precision, config.rate),
            )
        }))
    }

    /// Returns the known codes, sorted.
    #[must_use]
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.currencies.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Number of currencies in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    /// Returns true if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}

impl CurrencyStore for CurrencyRepository {
    fn get(&self, code: &str) -> AppResult<CurrencyDetails> {
        self.currencies
            .get(code)
            .copied()
            .ok_or_else(|| AppError::RepoCurrencyNotFound(code.to_string()))
    }
}
