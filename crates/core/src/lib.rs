//! Core rate logic for Rategate.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//! Rate combination, amount conversion and the decimal rules they share live
//! here, together with the capability traits the outer crates implement.
//!
//! # Modules
//!
//! - `currency` - Cross rates, exchange calculation and rate sources

pub mod currency;
