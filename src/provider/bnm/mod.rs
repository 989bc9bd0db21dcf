//! National Bank of Moldova (BNM) rate provider.
//!
//! Fetches the official exchange rate export for a date and parses it into
//! the common result shape. The export is a `;`-separated table wrapped in a
//! two-line banner and a four-line footer; rates are quoted as MDL per
//! `unit` units of the foreign currency (e.g. per 100 HUF), with a decimal
//! comma.

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
const PROVIDER_ID: &str = "BNM";

/// All BNM rates are quoted against the Moldovan leu.
const BASE_CURRENCY: &str = "MDL";

/// Export endpoint; the `dd.mm.yyyy` date is appended as-is.
const RATES_URL: &str = "https://bnm.md/en/export-official-exchange-rates?date=";

/// Banner lines above the CSV header row.
const BANNER_LINES: usize = 2;

/// Footer lines after the last data row.
const FOOTER_LINES: usize = 4;

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One data row of the BNM export.
#[derive(Debug, Deserialize)]
struct BnmCsvRow {
    #[serde(rename = "Currency")]
    currency: String,
    #[serde(rename = "Abbr")]
    abbr: String,
    /// Quoting unit, despite the column name
    #[serde(rename = "Rate")]
    unit: String,
    /// Exchange rate with a decimal comma
    #[serde(rename = "Rates")]
    rate: String,
}

/// National Bank of Moldova rate provider.
///
/// Owns a per-date cache of the full parsed rate set; repeated calls for the
/// same date with different currency filters reuse one fetch.
pub struct BnmProvider {
    client: Client,
    cache: RwLock<HashMap<String, HashMap<String, RateResult>>>,
}

impl BnmProvider {
    /// Create a new BNM provider.
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch the raw export body for a date.
    async fn fetch_export(&self, date: &str) -> Result<String, RateError> {
        let url = format!("{}{}", RATES_URL, date);
        debug!("BNM request: {}", url);

        let response = self
            .client
            .get(&url)
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

        response
            .text()
            .await
            .map_err(|e| RateError::from_reqwest(PROVIDER_ID, e))
    }

    /// Parse the export body into a code -> rate mapping.
    ///
    /// A body too short to contain data rows after trimming the banner and
    /// footer parses as an empty set.
    fn parse_rates(body: &str) -> Result<HashMap<String, RateResult>, RateError> {
        let lines: Vec<&str> = body.lines().collect();
        if lines.len() <= BANNER_LINES + FOOTER_LINES {
            return Ok(HashMap::new());
        }
        let table = lines[BANNER_LINES..lines.len() - FOOTER_LINES].join("\n");

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .trim(csv::Trim::All)
            .from_reader(table.as_bytes());

        let mut rates = HashMap::new();
        for row in reader.deserialize::<BnmCsvRow>() {
            let row = row.map_err(|e| RateError::Parse {
                message: format!("bad CSV row: {}", e),
            })?;

            let unit: u32 = row.unit.parse().map_err(|_| RateError::Parse {
                message: format!("bad unit for {}: {:?}", row.abbr, row.unit),
            })?;
            let rate: Decimal =
                row.rate
                    .replace(',', ".")
                    .parse()
                    .map_err(|_| RateError::Parse {
                        message: format!("bad rate for {}: {:?}", row.abbr, row.rate),
                    })?;

            rates.insert(
                row.abbr.clone(),
                RateResult {
                    name: row.currency,
                    rate_text: format!("{} {} = {} {}", unit, row.abbr, rate, BASE_CURRENCY),
                    code: row.abbr,
                    unit,
                    rate,
                    base_currency: BASE_CURRENCY.to_string(),
                },
            );
        }

        Ok(rates)
    }
}

impl Default for BnmProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateProvider for BnmProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn base_currency(&self) -> &'static str {
        BASE_CURRENCY
    }

    fn default_date(&self) -> String {
        Local::now().format("%d.%m.%Y").to_string()
    }

    async fn get_rates(
        &self,
        date: Option<&str>,
        currencies: Option<&[&str]>,
    ) -> Result<RatesResult, RateError> {
        let date = match date {
            Some(d) => d.to_string(),
            None => self.default_date(),
        };

        // The lock is never held across an await
        let cached = {
            let cache = self
                .cache
                .read()
                .map_err(|e| RateError::Unknown(e.to_string()))?;
            cache.get(&date).cloned()
        };

        let rates = match cached {
            Some(rates) => {
                debug!("BNM cache hit for {}", date);
                rates
            }
            None => {
                let body = self.fetch_export(&date).await?;
                let rates = Self::parse_rates(&body)?;
                let mut cache = self
                    .cache
                    .write()
                    .map_err(|e| RateError::Unknown(e.to_string()))?;
                cache.insert(date.clone(), rates.clone());
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

        Ok(RatesResult::new(date, PROVIDER_ID, rates))
    }
}
