//! Repository abstractions for data access.
//!
//! Repositories are built once at startup and are read-only afterwards, so
//! they can be shared between request handlers without locking.

pub mod currency;

pub use currency::CurrencyRepository;
