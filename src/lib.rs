//! Foreign-exchange rates with pluggable providers.
//!
//! This crate fetches exchange rates from external sources, normalizes them
//! into a common result shape, caches them per date, and offers currency
//! conversion through the shared base currency.
//!
//! # Overview
//!
//! Each provider wraps one external source with its own wire format, base
//! currency, and date convention:
//!
//! - [`BnmProvider`] - National Bank of Moldova CSV export
//!   (base MDL, dates `dd.mm.yyyy`)
//! - [`FixerProvider`] - data.fixer.io JSON API
//!   (base EUR, dates `yyyy-mm-dd`, requires an API key)
//!
//! Providers implement the [`RateProvider`] trait and own a per-date cache:
//! the first `get_rates` call for a date fetches and parses the full rate
//! set, later calls for the same date reuse it regardless of the currency
//! filter.
//!
//! # Example
//!
//! ```ignore
//! use fx_rates::get_provider;
//! use rust_decimal_macros::dec;
//!
//! let provider = get_provider("BNM", None).expect("known provider");
//! let rates = provider.get_rates(Some("15.01.2025"), None).await?;
//! let eur = provider.get_rate(Some("15.01.2025"), "EUR").await?;
//! let mdl = provider.convert(Some("15.01.2025"), dec!(100), "EUR", "USD").await?;
//! ```

pub mod errors;
pub mod factory;
pub mod models;
pub mod provider;

// Re-export the public surface
pub use errors::RateError;
pub use factory::{get_provider, ProviderKind};
pub use models::{RateResult, RatesResult};
pub use provider::bnm::BnmProvider;
pub use provider::fixer::FixerProvider;
pub use provider::RateProvider;
