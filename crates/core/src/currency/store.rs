//! Currency details used by the exchange calculator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rategate_shared::AppResult;

/// Rate and rendering precision of a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyDetails {
    /// Fractional digits used when rendering amounts in this currency.
    pub decimal_precision: u32,
    /// Rate relative to the base currency.
    pub rate: Decimal,
}

impl CurrencyDetails {
    /// Creates new currency details.
    #[must_use]
    pub const fn new(decimal_precision: u32, rate: Decimal) -> Self {
        Self {
            decimal_precision,
            rate,
        }
    }

    /// Returns true when neither field is zero.
    ///
    /// A zeroed record is treated as bad data, not as a missing currency.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.decimal_precision != 0 && !self.rate.is_zero()
    }
}

/// Read-only lookup of currency details by code.
///
/// Implementations are built once at startup and shared between requests.
pub trait CurrencyStore: Send + Sync {
    /// Returns the details of `code`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::RepoCurrencyNotFound` if the code is unknown.
    fn get(&self, code: &str) -> AppResult<CurrencyDetails>;
}
