//! Upstream rate probe.
//!
//! Fetches the latest rates for a list of currency codes straight from the
//! configured provider and prints them as JSON. Handy for checking an app id
//! or comparing provider output against `/rates`.
//!
//! Usage: cargo run --bin probe -- USD,INR,EUR,BTC

use std::collections::BTreeMap;

use anyhow::Context;
use serde_json::json;

use rategate_core::currency::RateProvider;
use rategate_shared::AppConfig;
use rategate_upstream::OpenExchangeClient;

/// Codes fetched when none are given.
const DEFAULT_CODES: [&str; 4] = ["USD", "INR", "EUR", "BTC"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let codes = requested_codes(std::env::args().skip(1));

    let config = AppConfig::load().context("failed to load configuration")?;
    let client = OpenExchangeClient::from_config(&config.provider)?;

    eprintln!("Fetching {} rates from {}...", codes.len(), client.url());
    let snapshot = client.fetch(&codes).await?;

    let missing: Vec<&str> = codes
        .iter()
        .filter(|code| !snapshot.rates.contains_key(*code))
        .map(String::as_str)
        .collect();
    let rates: BTreeMap<_, _> = snapshot.rates.iter().collect();

    let output = json!({
        "base": snapshot.base,
        "published_at": snapshot.published_at,
        "rates": rates,
        "missing": missing,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Splits arguments on commas and whitespace, upper-cases them, and falls back
/// to the default list.
fn requested_codes(args: impl Iterator<Item = String>) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    for arg in args {
        for code in arg.split([',', ' ']).map(str::trim).filter(|c| !c.is_empty()) {
            let code = code.to_uppercase();
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
    }

    if codes.is_empty() {
        DEFAULT_CODES.iter().map(ToString::to_string).collect()
    } else {
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(ToString::to_string).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_defaults_when_no_args() {
        assert_eq!(requested_codes(args(&[])), vec!["USD", "INR", "EUR", "BTC"]);
    }

    #[test]
    fn test_comma_and_separate_args() {
        assert_eq!(
            requested_codes(args(&["usd,gbp", "EUR", "GBP"])),
            vec!["USD", "GBP", "EUR"]
        );
    }
}
