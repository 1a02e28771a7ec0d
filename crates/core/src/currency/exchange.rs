//! Amount conversion between two repository currencies.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rategate_shared::{AppError, AppResult};

use super::conversion::{divide, multiply, to_fixed};
use super::store::{CurrencyDetails, CurrencyStore};

/// A validated exchange request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRequest {
    /// Source currency code.
    pub from: String,
    /// Target currency code.
    pub to: String,
    /// Non-negative amount in source units.
    pub amount: Decimal,
}

/// Converted amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeResult {
    /// Source currency code.
    pub from: String,
    /// Target currency code.
    pub to: String,
    /// Amount in target units, fixed to the target's precision.
    pub amount: String,
}

impl ExchangeRequest {
    /// Validates raw request parameters.
    ///
    /// Runs before any repository lookup, so malformed input never touches
    /// the store.
    pub fn parse(from: Option<&str>, to: Option<&str>, amount: Option<&str>) -> AppResult<Self> {
        let from = required("from", from)?;
        let to = required("to", to)?;
        let raw_amount = required("amount", amount)?;

        let amount = Decimal::from_str(&raw_amount)
            .or_else(|_| Decimal::from_scientific(&raw_amount))
            .map_err(|_| AppError::AmountNotNumber(raw_amount.clone()))?;

        if amount < Decimal::ZERO {
            return Err(AppError::NegativeAmount(raw_amount));
        }

        Ok(Self {
            from: from.to_uppercase(),
            to: to.to_uppercase(),
            // "-0" parses as negative zero
            amount: if amount.is_zero() { Decimal::ZERO } else { amount },
        })
    }
}

fn required(name: &str, value: Option<&str>) -> AppResult<String> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(AppError::EmptyParameter(name.to_string())),
    }
}

/// Converts `amount` from `source` into `target` units.
///
/// `exchange_rate = source.rate / target.rate`, and the product is rendered
/// with the target's precision.
///
/// An amount whose product exceeds the decimal range is `InvalidRequest`.
pub fn convert(
    amount: Decimal,
    source: &CurrencyDetails,
    target: &CurrencyDetails,
) -> AppResult<String> {
    let exchange_rate = divide(source.rate, target.rate)?;
    let result = multiply(amount, exchange_rate).map_err(|_| {
        AppError::InvalidRequest(format!("amount {amount} is too large to convert"))
    })?;
    Ok(to_fixed(result, target.decimal_precision))
}

/// Looks up both currencies and converts the requested amount.
pub fn exchange<S>(store: &S, request: &ExchangeRequest) -> AppResult<ExchangeResult>
where
    S: CurrencyStore + ?Sized,
{
    let source = store.get(&request.from)?;
    let target = store.get(&request.to)?;

    if !source.is_usable() {
        return Err(AppError::ZeroValue(request.from.clone()));
    }
    if !target.is_usable() {
        return Err(AppError::ZeroValue(request.to.clone()));
    }

    Ok(ExchangeResult {
        from: request.from.clone(),
        to: request.to.clone(),
        amount: convert(request.amount, &source, &target)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    struct MapStore(HashMap<&'static str, CurrencyDetails>);

    impl CurrencyStore for MapStore {
        fn get(&self, code: &str) -> AppResult<CurrencyDetails> {
            self.0
                .get(code)
                .copied()
                .ok_or_else(|| AppError::RepoCurrencyNotFound(code.to_string()))
        }
    }

    fn store() -> MapStore {
        MapStore(HashMap::from([
            ("BEER", CurrencyDetails::new(18, dec!(0.00002461))),
            ("FLOKI", CurrencyDetails::new(18, dec!(0.0001428))),
            ("GATE", CurrencyDetails::new(18, dec!(6.87))),
            ("USDT", CurrencyDetails::new(6, dec!(0.999))),
            ("WBTC", CurrencyDetails::new(8, dec!(57037.22))),
            ("NULL", CurrencyDetails::new(8, Decimal::ZERO)),
            ("FLAT", CurrencyDetails::new(0, dec!(1.5))),
        ]))
    }

    fn run(from: &str, to: &str, amount: &str) -> AppResult<ExchangeResult> {
        let request = ExchangeRequest::parse(Some(from), Some(to), Some(amount))?;
        exchange(&store(), &request)
    }

    #[rstest]
    #[case("USDT", "BEER", "1.0", "40593.254774481917919500")]
    #[case("BEER", "USDT", "108.108", "0.002663")]
    #[case("GATE", "FLOKI", "123.12345", "5923376.060924369747894400")]
    #[case("USDT", "WBTC", "1", "0.00001751")]
    #[case("USDT", "USDT", "2.5", "2.500000")]
    #[case("USDT", "BEER", "0", "0.000000000000000000")]
    #[case("USDT", "BEER", "-0", "0.000000000000000000")]
    #[case("usdt", " wbtc ", "1e0", "0.00001751")]
    #[case("USDT", "BEER", "10000000", "405932547744.819179195000000000")]
    #[case("USDT", "BEER", "1e20", "4059325477448191791950000.000000000000000000")]
    fn test_exchange(
        #[case] from: &str,
        #[case] to: &str,
        #[case] amount: &str,
        #[case] expected: &str,
    ) {
        let result = run(from, to, amount).unwrap();
        assert_eq!(result.from, from.trim().to_uppercase());
        assert_eq!(result.to, to.trim().to_uppercase());
        assert_eq!(result.amount, expected);
    }

    #[test]
    fn test_exchange_is_idempotent() {
        assert_eq!(
            run("GATE", "WBTC", "42.42").unwrap(),
            run("GATE", "WBTC", "42.42").unwrap()
        );
    }

    #[rstest]
    #[case(None, Some("BEER"), Some("1"), "from")]
    #[case(Some("USDT"), Some(""), Some("1"), "to")]
    #[case(Some("USDT"), Some("BEER"), Some("  "), "amount")]
    fn test_parse_empty_parameter(
        #[case] from: Option<&str>,
        #[case] to: Option<&str>,
        #[case] amount: Option<&str>,
        #[case] name: &str,
    ) {
        assert_eq!(
            ExchangeRequest::parse(from, to, amount).unwrap_err(),
            AppError::EmptyParameter(name.to_string())
        );
    }

    #[rstest]
    #[case("abc")]
    #[case("1.2.3")]
    #[case("12a")]
    fn test_parse_amount_not_number(#[case] amount: &str) {
        assert!(matches!(
            ExchangeRequest::parse(Some("USDT"), Some("BEER"), Some(amount)),
            Err(AppError::AmountNotNumber(_))
        ));
    }

    #[test]
    fn test_parse_negative_amount() {
        assert_eq!(
            ExchangeRequest::parse(Some("USDT"), Some("BEER"), Some("-0.01")).unwrap_err(),
            AppError::NegativeAmount("-0.01".to_string())
        );
    }

    #[test]
    fn test_amount_beyond_decimal_range() {
        assert_eq!(
            run("USDT", "BEER", "79228162514264337593543950335").unwrap_err(),
            AppError::InvalidRequest(
                "amount 79228162514264337593543950335 is too large to convert".to_string()
            )
        );
    }

    #[test]
    fn test_unknown_currencies() {
        assert_eq!(
            run("DOGE", "BEER", "1").unwrap_err(),
            AppError::RepoCurrencyNotFound("DOGE".to_string())
        );
        assert_eq!(
            run("BEER", "DOGE", "1").unwrap_err(),
            AppError::RepoCurrencyNotFound("DOGE".to_string())
        );
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(
            run("NULL", "BEER", "1").unwrap_err(),
            AppError::ZeroValue("NULL".to_string())
        );
        assert_eq!(
            run("BEER", "NULL", "1").unwrap_err(),
            AppError::ZeroValue("NULL".to_string())
        );
        assert_eq!(
            run("FLAT", "BEER", "1").unwrap_err(),
            AppError::ZeroValue("FLAT".to_string())
        );
    }
}
