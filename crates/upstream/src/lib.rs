//! Upstream rate provider clients.
//!
//! This crate provides:
//! - `OpenExchangeClient`, a `RateProvider` backed by openexchangerates.org

pub mod openexchange;

pub use openexchange::OpenExchangeClient;
