//! Rate result models
//!
//! - `rate` - Normalized rate data (RateResult, RatesResult)

mod rate;

pub use rate::{RateResult, RatesResult};
