//! Application configuration management.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Largest number of fractional digits a decimal can carry.
pub const MAX_DECIMAL_PRECISION: u32 = 28;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream rate provider configuration.
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Exchange currency table. Empty means the built-in table is used.
    #[serde(default)]
    pub currencies: HashMap<String, CurrencyConfig>,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-request timeout applied by the HTTP layer.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            shutdown_timeout_secs: default_shutdown_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    10
}

fn default_shutdown_timeout() -> u64 {
    5
}

/// Upstream rate provider configuration (openexchangerates.org).
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the provider API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Application id issued by the provider.
    #[serde(default)]
    pub app_id: String,
    /// Currency all fetched rates are relative to.
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    /// Client-side timeout for a single fetch.
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            app_id: String::new(),
            base_currency: default_base_currency(),
            timeout_secs: default_provider_timeout(),
        }
    }
}

fn default_api_url() -> String {
    "https://openexchangerates.org/api/".to_string()
}

fn default_base_currency() -> String {
    "USD".to_string()
}

fn default_provider_timeout() -> u64 {
    10
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log every error returned to a client.
    #[serde(default = "default_log_errors")]
    pub log_errors: bool,
    /// Emit JSON formatted log lines.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_errors: default_log_errors(),
            json: false,
        }
    }
}

fn default_log_errors() -> bool {
    true
}

/// A currency entry of the exchange table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CurrencyConfig {
    /// Fractional digits used when rendering amounts in this currency.
    pub decimal_precision: u32,
    /// Rate relative to the base currency.
    pub rate: Decimal,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// `RATEGATE__*` environment variables, and finally a bare `APP_ID`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("RATEGATE").separator("__"))
            .set_override_option("provider.app_id", std::env::var("APP_ID").ok())?
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Checks values that deserialization alone cannot enforce.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid setting.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.provider.app_id.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "provider.app_id is required (set APP_ID or RATEGATE__PROVIDER__APP_ID)"
                    .to_string(),
            ));
        }
        if self.provider.base_currency.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "provider.base_currency must not be empty".to_string(),
            ));
        }
        if let Some((code, _)) = self
            .currencies
            .iter()
            .find(|(_, c)| c.decimal_precision > MAX_DECIMAL_PRECISION)
        {
            return Err(config::ConfigError::Message(format!(
                "currencies.{code}.decimal_precision exceeds {MAX_DECIMAL_PRECISION}"
            )));
        }
        Ok(())
    }

    /// Returns a copy safe to log, with the provider app id masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.provider.app_id = mask(&self.provider.app_id);
        copy
    }
}

fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
