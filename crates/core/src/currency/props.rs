//! Property-based tests for cross rates and exchange.
//!
//! - Pair generation covers every ordered pair exactly once
//! - Cross rates invert each other within rounding tolerance
//! - Calculations are deterministic

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::exchange::convert;
use super::rates::{CROSS_RATE_SCALE, RateTable, combinations, cross_rates};
use super::store::CurrencyDetails;

/// Strategy to generate 2 to 8 distinct three-letter codes.
fn currency_codes() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[A-Z]{3}", 2..8).prop_map(|codes| codes.into_iter().collect())
}

/// Strategy to generate positive rates (0.01 to 1000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (100i64..10_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate non-negative amounts (0.00 to 1,000,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate wide amounts (0.00 to 1,000,000,000,000.00).
fn wide_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a rate table keyed by the given codes.
fn rate_table(codes: Vec<String>) -> impl Strategy<Value = (Vec<String>, RateTable)> {
    prop::collection::vec(positive_rate(), codes.len()).prop_map(move |rates| {
        let table: HashMap<String, Decimal> = codes.iter().cloned().zip(rates).collect();
        (codes.clone(), table)
    })
}

fn parse_rate(rate: &str) -> Decimal {
    rate.parse().expect("rendered rate should parse")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* list of n distinct codes, exactly n(n-1) pairs are produced,
    /// none of them a self-pair, all of them distinct.
    #[test]
    fn prop_combinations_cover_all_ordered_pairs(codes in currency_codes()) {
        let n = codes.len();
        let pairs = combinations(&codes);

        prop_assert_eq!(pairs.len(), n * (n - 1));
        prop_assert!(pairs.iter().all(|p| p.source != p.target));

        let unique: HashSet<_> = pairs.iter().collect();
        prop_assert_eq!(unique.len(), pairs.len());
    }

    /// *For any* table, every rendered cross rate has exactly 8 fractional digits.
    #[test]
    fn prop_cross_rates_are_fixed_to_eight_places(
        (codes, table) in currency_codes().prop_flat_map(rate_table),
    ) {
        let rates = cross_rates(&table, &combinations(&codes)).unwrap();
        for rate in rates {
            let fraction = rate.rate.split('.').nth(1).unwrap_or_default();
            prop_assert_eq!(fraction.len(), CROSS_RATE_SCALE as usize);
        }
    }

    /// *For any* two currencies, rate(A->B) * rate(B->A) is 1 within the
    /// error introduced by rounding each side to 8 places.
    #[test]
    fn prop_cross_rates_round_trip(a in positive_rate(), b in positive_rate()) {
        let table: RateTable = HashMap::from([
            ("AAA".to_string(), a),
            ("BBB".to_string(), b),
        ]);
        let codes = vec!["AAA".to_string(), "BBB".to_string()];
        let rates = cross_rates(&table, &combinations(&codes)).unwrap();

        let forward = parse_rate(&rates[0].rate);
        let backward = parse_rate(&rates[1].rate);
        let tolerance = (forward + backward) * Decimal::new(1, 8);

        prop_assert!(
            (forward * backward - Decimal::ONE).abs() <= tolerance,
            "{} * {} too far from 1",
            forward,
            backward
        );
    }

    /// *For any* table, repeated calculation yields byte-identical output.
    #[test]
    fn prop_cross_rates_are_deterministic(
        (codes, table) in currency_codes().prop_flat_map(rate_table),
    ) {
        let pairs = combinations(&codes);
        prop_assert_eq!(
            cross_rates(&table, &pairs).unwrap(),
            cross_rates(&table, &pairs).unwrap()
        );
    }

    /// *For any* amount, converting a currency into itself keeps the amount.
    #[test]
    fn prop_same_currency_exchange_preserves_amount(
        value in amount(),
        rate in positive_rate(),
        precision in 2u32..=18,
    ) {
        let details = CurrencyDetails::new(precision, rate);
        let converted = convert(value, &details, &details).unwrap();
        prop_assert_eq!(parse_rate(&converted), value);
    }

    /// *For any* amount, the rendered result carries the target's precision.
    #[test]
    fn prop_exchange_uses_target_precision(
        value in wide_amount(),
        source_rate in positive_rate(),
        target_rate in positive_rate(),
        precision in 1u32..=18,
    ) {
        let source = CurrencyDetails::new(6, source_rate);
        let target = CurrencyDetails::new(precision, target_rate);
        let converted = convert(value, &source, &target).unwrap();

        let fraction = converted.split('.').nth(1).unwrap_or_default();
        prop_assert_eq!(fraction.len(), precision as usize);
    }
}
