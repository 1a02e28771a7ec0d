//! Cross-rate calculation over a base-relative rate table.
//!
//! Given rates that are all expressed against one implicit base currency, the
//! rate for any ordered pair is `rate(target) / rate(source)`.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rategate_shared::{AppError, AppResult};

use super::conversion::{divide, to_fixed};

/// Fractional digits of a rendered cross rate.
pub const CROSS_RATE_SCALE: u32 = 8;

/// Separator between codes in the currencies parameter.
pub const CURRENCY_DELIMITER: char = ',';

/// Currency code to rate, all relative to the same base currency.
pub type RateTable = HashMap<String, Decimal>;

/// Ordered currency pair. Source and target always differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyCombination {
    /// Currency being converted from.
    pub source: String,
    /// Currency being converted to.
    pub target: String,
}

/// Rate for one ordered pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossRate {
    /// Source currency code.
    pub from: String,
    /// Target currency code.
    pub to: String,
    /// 1 `from` = `rate` `to`, fixed to 8 places.
    pub rate: String,
}

/// Parses and validates the delimited currency list.
///
/// Codes are trimmed and upper-cased. At least two distinct codes are
/// required.
pub fn parse_currency_list(param: Option<&str>) -> AppResult<Vec<String>> {
    let param = param.map(str::trim).unwrap_or_default();
    if param.is_empty() {
        return Err(AppError::EmptyParameter("currencies".to_string()));
    }

    let currencies: Vec<String> = param
        .split(CURRENCY_DELIMITER)
        .map(|code| code.trim().to_uppercase())
        .collect();

    if currencies.iter().any(String::is_empty) {
        return Err(AppError::InvalidRequest(format!(
            "empty currency code in '{param}'"
        )));
    }

    if currencies.len() < 2 {
        return Err(AppError::InvalidRequest(
            "at least two currencies are required".to_string(),
        ));
    }

    if let Some(duplicate) = find_duplicate(&currencies) {
        return Err(AppError::InvalidRequest(format!(
            "duplicate currency {duplicate}"
        )));
    }

    Ok(currencies)
}

fn find_duplicate(currencies: &[String]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(currencies.len());
    currencies
        .iter()
        .map(String::as_str)
        .find(|code| !seen.insert(*code))
}

/// Generates every ordered pair without self-pairs.
///
/// Sources follow input order; for each source, targets follow input order.
#[must_use]
pub fn combinations(currencies: &[String]) -> Vec<CurrencyCombination> {
    let n = currencies.len();
    let mut result = Vec::with_capacity(n * n.saturating_sub(1));

    for source in currencies {
        for target in currencies {
            if source != target {
                result.push(CurrencyCombination {
                    source: source.clone(),
                    target: target.clone(),
                });
            }
        }
    }

    result
}

/// Computes the cross rate of a single combination.
pub fn cross_rate(rates: &RateTable, combination: &CurrencyCombination) -> AppResult<CrossRate> {
    let source_rate = lookup(rates, &combination.source)?;
    if source_rate.is_zero() {
        return Err(AppError::ZeroValue(combination.source.clone()));
    }
    let target_rate = lookup(rates, &combination.target)?;

    let rate = divide(target_rate, source_rate)?;

    Ok(CrossRate {
        from: combination.source.clone(),
        to: combination.target.clone(),
        rate: to_fixed(rate, CROSS_RATE_SCALE),
    })
}

/// Computes cross rates for all combinations, in order.
///
/// Aborts on the first failing combination; no partial list is returned.
pub fn cross_rates(
    rates: &RateTable,
    combinations: &[CurrencyCombination],
) -> AppResult<Vec<CrossRate>> {
    if combinations.is_empty() {
        return Err(AppError::InvalidRequest(
            "no currency combinations given".to_string(),
        ));
    }

    combinations
        .iter()
        .map(|combination| cross_rate(rates, combination))
        .collect()
}

fn lookup(rates: &RateTable, code: &str) -> AppResult<Decimal> {
    rates
        .get(code)
        .copied()
        .ok_or_else(|| AppError::CurrencyNotFound(code.to_string()))
}
