//! Shared error kinds and configuration for Rategate.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error kinds and their HTTP classification
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, CurrencyConfig, LoggingConfig, ProviderConfig, ServerConfig};
pub use error::{AppError, AppResult};
