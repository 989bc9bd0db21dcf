//! Fixer (data.fixer.io) rate provider.
//!
//! Fetches a flat code -> rate mapping from the Fixer JSON API. Rates are
//! quoted as units of foreign currency per 1 EUR, so the quoting unit is
//! always 1 and `convert` is overridden with the simpler single-unit
//! arithmetic. Requires an API key, sent as the `access_key` query
//! parameter.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::RateError;
use crate::models::{RateResult, RatesResult};
use crate::provider::RateProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "FIXER";

/// Fixer quotes everything against the euro.
const BASE_CURRENCY: &str = "EUR";

const LATEST_RATES_URL: &str = "https://data.fixer.io/api/latest";
const HISTORICAL_RATES_URL: &str = "https://data.fixer.io/api/";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// API response from Fixer
#[derive(Debug, Deserialize)]
struct FixerResponse {
    /// Whether the request was accepted by the API
    success: bool,
    /// Rates for the date (code -> units of that currency per 1 EUR)
    #[serde(default)]
    rates: HashMap<String, f64>,
    /// Error details when `success` is false
    error: Option<FixerApiError>,
}

#[derive(Debug, Deserialize)]
struct FixerApiError {
    #[allow(dead_code)]
    code: i64,
    info: Option<String>,
}

/// Fixer rate provider.
///
/// Owns a per-date cache of the full fetched rate set; repeated calls for
/// the same date with different currency filters reuse one fetch.
pub struct FixerProvider {
    client: Client,
    api_key: String,
    cache: RwLock<HashMap<String, HashMap<String, RateResult>>>,
}

impl FixerProvider {
    /// Create a new Fixer provider with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch the raw rate mapping, from the latest endpoint when no date is
    /// given or the historical-by-date endpoint otherwise.
    async fn fetch_rates(&self, date: Option<&str>) -> Result<HashMap<String, f64>, RateError> {
        let url = match date {
            Some(d) => format!("{}{}", HISTORICAL_RATES_URL, d),
            None => LATEST_RATES_URL.to_string(),
        };
        debug!("Fixer request: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("access_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| RateError::from_reqwest(PROVIDER_ID, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::Http {
                provider: PROVIDER_ID.to_string(),
                status: status.as_u16(),
            });
        }

        let body: FixerResponse = response
            .json()
            .await
            .map_err(|e| RateError::from_reqwest(PROVIDER_ID, e))?;

        if !body.success {
            let message = body
                .error
                .and_then(|e| e.info)
                .unwrap_or_else(|| "API request failed".to_string());
            return Err(RateError::Request {
                provider: PROVIDER_ID.to_string(),
                message,
            });
        }

        Ok(body.rates)
    }

    /// Build the normalized rate mapping; Fixer quotes per single unit.
    fn build_rates(raw: HashMap<String, f64>) -> Result<HashMap<String, RateResult>, RateError> {
        let mut rates = HashMap::new();
        for (code, rate) in raw {
            let rate = Decimal::try_from(rate).map_err(|_| RateError::Parse {
                message: format!("bad rate for {}: {}", code, rate),
            })?;
            rates.insert(
                code.clone(),
                RateResult {
                    name: code.clone(),
                    rate_text: format!("1 {} = {} {}", BASE_CURRENCY, rate, code),
                    code,
                    unit: 1,
                    rate,
                    base_currency: BASE_CURRENCY.to_string(),
                },
            );
        }
        Ok(rates)
    }
}

#[async_trait]
impl RateProvider for FixerProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn base_currency(&self) -> &'static str {
        BASE_CURRENCY
    }

    fn default_date(&self) -> String {
        Local::now().format("%Y-%m-%d").to_string()
    }

    async fn get_rates(
        &self,
        date: Option<&str>,
        currencies: Option<&[&str]>,
    ) -> Result<RatesResult, RateError> {
        // No date means the latest endpoint; today's date is still the
        // cache key and the date stamped on the result.
        let date_key = match date {
            Some(d) => d.to_string(),
            None => self.default_date(),
        };

        let cached = {
            let cache = self
                .cache
                .read()
                .map_err(|e| RateError::Unknown(e.to_string()))?;
            cache.get(&date_key).cloned()
        };

        let rates = match cached {
            Some(rates) => {
                debug!("Fixer cache hit for {}", date_key);
                rates
            }
            None => {
                let raw = self.fetch_rates(date).await?;
                let rates = Self::build_rates(raw)?;
                let mut cache = self
                    .cache
                    .write()
                    .map_err(|e| RateError::Unknown(e.to_string()))?;
                cache.insert(date_key.clone(), rates.clone());
                rates
            }
        };

        let rates = match currencies {
            Some(wanted) => rates
                .into_iter()
                .filter(|(code, _)| wanted.contains(&code.as_str()))
                .collect(),
            None => rates,
        };

        Ok(RatesResult::new(date_key, PROVIDER_ID, rates))
    }

    /// Fixer rates are per single unit, so the cross rate reduces to
    /// `to.rate / from.rate`.
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

        if from_rate.rate.is_zero() {
            return Err(RateError::Parse {
                message: format!("zero rate for {}", from_code),
            });
        }

        Ok((to_rate.rate * amount) / from_rate.rate)
    }
}
