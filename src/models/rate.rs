use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One currency's rate against the provider's base currency.
///
/// `rate` is the amount of base currency for `unit` units of this currency.
/// Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateResult {
    /// Display name of the currency (e.g. "Euro")
    pub name: String,

    /// ISO-like currency code, unique within a [`RatesResult`]
    pub code: String,

    /// Quoting unit; the rate is per this many units of the currency
    pub unit: u32,

    /// Amount of base currency per `unit` units of this currency
    pub rate: Decimal,

    /// The currency the rate is quoted against (provider-fixed)
    pub base_currency: String,

    /// Precomputed human-readable form, e.g. "100 HUF = 4.5012 MDL"
    pub rate_text: String,
}

/// A snapshot of rates for one date from one provider.
///
/// All entries share the provider's base currency. Immutable once
/// constructed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatesResult {
    /// The date of the snapshot, in the provider's date format
    pub date: String,

    /// Name of the provider that produced the snapshot
    pub provider: String,

    /// Mapping from currency code to its rate
    pub rates: HashMap<String, RateResult>,
}

impl RatesResult {
    /// Create a snapshot for one date from one provider.
    pub fn new(
        date: impl Into<String>,
        provider: impl Into<String>,
        rates: HashMap<String, RateResult>,
    ) -> Self {
        Self {
            date: date.into(),
            provider: provider.into(),
            rates,
        }
    }

    /// Look up the rate for a currency code.
    pub fn get(&self, code: &str) -> Option<&RateResult> {
        self.rates.get(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_rate() -> RateResult {
        RateResult {
            name: "Euro".to_string(),
            code: "EUR".to_string(),
            unit: 1,
            rate: dec!(19.3426),
            base_currency: "MDL".to_string(),
            rate_text: "1 EUR = 19.3426 MDL".to_string(),
        }
    }

    #[test]
    fn test_rates_result_lookup() {
        let mut rates = HashMap::new();
        rates.insert("EUR".to_string(), sample_rate());

        let result = RatesResult::new("15.01.2025", "BNM", rates);
        assert_eq!(result.date, "15.01.2025");
        assert_eq!(result.provider, "BNM");
        assert_eq!(result.get("EUR").unwrap().rate, dec!(19.3426));
        assert!(result.get("USD").is_none());
    }
}
