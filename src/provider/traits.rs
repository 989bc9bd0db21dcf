//! Rate provider trait definition.
//!
//! This module defines the core `RateProvider` trait that all
//! rate providers must implement.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::RateError;
use crate::models::{RateResult, RatesResult};

/// Trait for exchange rate providers.
///
/// Implement this trait to add support for a new rate source. Only
/// [`get_rates`](Self::get_rates) has to be provided; `get_rate` and
/// `convert` have default implementations built on top of it. A provider
/// whose rates are quoted without a unit divisor may override `convert`
/// with simpler arithmetic.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// A constant string like "BNM" or "FIXER", also used by the factory.
    fn id(&self) -> &'static str;

    /// The currency all of this provider's rates are quoted against.
    fn base_currency(&self) -> &'static str;

    /// Today's date formatted in this provider's date convention.
    ///
    /// Used whenever the caller omits the date argument.
    fn default_date(&self) -> String;

    /// Fetch all rates for a date, optionally filtered by currency codes.
    ///
    /// # Arguments
    ///
    /// * `date` - The date in the provider's format; `None` means today
    /// * `currencies` - Codes to keep; `None` returns the full set. Requested
    ///   codes absent from the fetched set are simply missing from the
    ///   result, not an error.
    async fn get_rates(
        &self,
        date: Option<&str>,
        currencies: Option<&[&str]>,
    ) -> Result<RatesResult, RateError>;

    /// Fetch the rate for a single currency code.
    ///
    /// Returns `Ok(None)` when the provider has no rate for the code.
    async fn get_rate(
        &self,
        date: Option<&str>,
        code: &str,
    ) -> Result<Option<RateResult>, RateError> {
        let result = self.get_rates(date, Some(&[code])).await?;
        Ok(result.rates.get(code).cloned())
    }

    /// Convert an amount from one currency to another via the base currency.
    ///
    /// Computes the cross rate as
    /// `(from.rate * to.unit) / (from.unit * to.rate)`, which assumes both
    /// rates are quoted as base currency per `unit` units of the foreign
    /// currency.
    ///
    /// # Errors
    ///
    /// [`RateError::InvalidCurrency`] when either code is absent from the
    /// provider's rate set for the date.
    async fn convert(
        &self,
        date: Option<&str>,
        amount: Decimal,
        from_code: &str,
        to_code: &str,
    ) -> Result<Decimal, RateError> {
        let result = self.get_rates(date, Some(&[from_code, to_code])).await?;

        let from_rate = result.rates.get(from_code).ok_or_else(|| {
            RateError::InvalidCurrency {
                code: from_code.to_string(),
            }
        })?;
        let to_rate = result.rates.get(to_code).ok_or_else(|| {
            RateError::InvalidCurrency {
                code: to_code.to_string(),
            }
        })?;

        if from_rate.unit == 0 || to_rate.rate.is_zero() {
            return Err(RateError::Parse {
                message: format!("zero rate or unit for {}/{}", from_code, to_code),
            });
        }

        let cross = (from_rate.rate * Decimal::from(to_rate.unit))
            / (Decimal::from(from_rate.unit) * to_rate.rate);
        Ok(cross * amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    /// Provider serving a fixed rate table, exercising the trait defaults.
    struct FixedProvider {
        rates: HashMap<String, RateResult>,
    }

    impl FixedProvider {
        fn new() -> Self {
            let mut rates = HashMap::new();
            for (name, code, unit, rate) in [
                ("US Dollar", "USD", 1u32, dec!(21)),
                ("Euro", "EUR", 1, dec!(19.5)),
                ("Romanian Leu", "RON", 10, dec!(42)),
            ] {
                rates.insert(
                    code.to_string(),
                    RateResult {
                        name: name.to_string(),
                        code: code.to_string(),
                        unit,
                        rate,
                        base_currency: "MDL".to_string(),
                        rate_text: format!("{} {} = {} MDL", unit, code, rate),
                    },
                );
            }
            Self { rates }
        }
    }

    #[async_trait]
    impl RateProvider for FixedProvider {
        fn id(&self) -> &'static str {
            "FIXED"
        }

        fn base_currency(&self) -> &'static str {
            "MDL"
        }

        fn default_date(&self) -> String {
            "15.01.2025".to_string()
        }

        async fn get_rates(
            &self,
            date: Option<&str>,
            currencies: Option<&[&str]>,
        ) -> Result<RatesResult, RateError> {
            let date = date.map(str::to_string).unwrap_or_else(|| self.default_date());
            let rates = match currencies {
                Some(wanted) => self
                    .rates
                    .iter()
                    .filter(|(code, _)| wanted.contains(&code.as_str()))
                    .map(|(code, rate)| (code.clone(), rate.clone()))
                    .collect(),
                None => self.rates.clone(),
            };
            Ok(RatesResult::new(date, self.id(), rates))
        }
    }

    #[tokio::test]
    async fn test_get_rate_matches_get_rates() {
        let provider = FixedProvider::new();

        let all = provider.get_rates(None, None).await.unwrap();
        let single = provider.get_rate(None, "EUR").await.unwrap().unwrap();
        assert_eq!(Some(&single), all.rates.get("EUR"));
    }

    #[tokio::test]
    async fn test_get_rate_absent_code() {
        let provider = FixedProvider::new();
        assert!(provider.get_rate(None, "JPY").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_convert_unit_aware() {
        let provider = FixedProvider::new();

        // 100 RON at 42 MDL per 10 RON, into USD at 21 MDL per 1 USD:
        // (42 * 1) / (10 * 21) * 100 = 20
        let converted = provider
            .convert(None, dec!(100), "RON", "USD")
            .await
            .unwrap();
        assert_eq!(converted, dec!(20));
    }

    #[tokio::test]
    async fn test_convert_identity() {
        let provider = FixedProvider::new();
        let converted = provider
            .convert(None, dec!(250), "EUR", "EUR")
            .await
            .unwrap();
        assert_eq!(converted, dec!(250));
    }

    #[tokio::test]
    async fn test_convert_invalid_currency() {
        let provider = FixedProvider::new();

        let err = provider
            .convert(None, dec!(100), "EUR", "XXX")
            .await
            .unwrap_err();
        assert!(matches!(err, RateError::InvalidCurrency { code } if code == "XXX"));

        let err = provider
            .convert(None, dec!(100), "XXX", "EUR")
            .await
            .unwrap_err();
        assert!(matches!(err, RateError::InvalidCurrency { code } if code == "XXX"));
    }
}
