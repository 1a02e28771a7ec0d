//! In-memory data layer.
//!
//! This crate provides:
//! - The static currency table used by the exchange calculator
//! - Repository implementations of the core lookup traits

pub mod repositories;

pub use repositories::CurrencyRepository;
