//! Exchange-rate client.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ToolsConfig;
use crate::error::ToolError;

/// Currencies advertised to the agent, with display names.
pub const SUPPORTED_CURRENCIES: [(&str, &str); 20] = [
    ("USD", "US Dollar"),
    ("EUR", "Euro"),
    ("GBP", "British Pound"),
    ("JPY", "Japanese Yen"),
    ("CAD", "Canadian Dollar"),
    ("AUD", "Australian Dollar"),
    ("CHF", "Swiss Franc"),
    ("CNY", "Chinese Yuan"),
    ("INR", "Indian Rupee"),
    ("KRW", "South Korean Won"),
    ("SGD", "Singapore Dollar"),
    ("HKD", "Hong Kong Dollar"),
    ("NZD", "New Zealand Dollar"),
    ("SEK", "Swedish Krona"),
    ("NOK", "Norwegian Krone"),
    ("MXN", "Mexican Peso"),
    ("BRL", "Brazilian Real"),
    ("RUB", "Russian Ruble"),
    ("ZAR", "South African Rand"),
    ("THB", "Thai Baht"),
];

/// Rates relative to one base currency, valid only at the moment fetched.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeRateTable {
    /// Base currency code.
    #[serde(default)]
    pub base: String,
    /// Target currency code to rate.
    #[serde(default)]
    pub rates: HashMap<String, f64>,
}

impl ExchangeRateTable {
    /// Rate for a currency code (case-insensitive).
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(&code.to_uppercase()).copied()
    }
}

/// Client for an exchangerate-api.com style `/latest/{BASE}` endpoint.
///
/// Every call fetches a fresh table; nothing is cached.
pub struct CurrencyConverter {
    client: reqwest::Client,
    base_url: String,
}

impl CurrencyConverter {
    /// Create a new converter from the shared tool configuration.
    pub fn new(config: &ToolsConfig) -> Result<Self, ToolError> {
        Ok(Self {
            client: config.http_client()?,
            base_url: config.exchange_rate_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the rate table for a base currency.
    pub async fn rate_table(&self, base: &str) -> Result<ExchangeRateTable, ToolError> {
        let url = format!("{}/{}", self.base_url, base.to_uppercase());

        debug!("Fetching exchange rates from: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            warn!("Exchange rate API returned status {}", response.status());
            return Err(ToolError::UpstreamStatus {
                service: "Exchange rate API",
                status: response.status().as_u16(),
            });
        }

        let table: ExchangeRateTable = response.json().await?;
        debug!("Received {} rates for {}", table.rates.len(), table.base);
        Ok(table)
    }

    /// Rate to convert one unit of `from` into `to`.
    pub async fn exchange_rate(&self, from: &str, to: &str) -> Result<f64, ToolError> {
        let table = self.rate_table(from).await?;
        table.rate(to).ok_or_else(|| {
            ToolError::Unavailable(format!(
                "Exchange rate {} to {}",
                from.to_uppercase(),
                to.to_uppercase()
            ))
        })
    }

    /// Convert `amount` from one currency to another.
    ///
    /// Identical currencies (ignoring case) return `amount` without any
    /// network call.
    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, ToolError> {
        if from.eq_ignore_ascii_case(to) {
            return Ok(amount);
        }

        let rate = self.exchange_rate(from, to).await?;
        Ok(amount * rate)
    }

    /// Rates for several targets from a single request.
    ///
    /// Keys are upper-cased and keep the requested order; codes missing from
    /// the upstream table map to `None`.
    pub async fn multiple_rates(
        &self,
        from: &str,
        to: &[String],
    ) -> Result<IndexMap<String, Option<f64>>, ToolError> {
        let table = self.rate_table(from).await?;

        Ok(to
            .iter()
            .map(|code| {
                let code = code.to_uppercase();
                let rate = table.rate(&code);
                (code, rate)
            })
            .collect())
    }

    /// The fixed catalogue of supported currency codes.
    pub fn supported_currencies(&self) -> IndexMap<&'static str, &'static str> {
        SUPPORTED_CURRENCIES.iter().copied().collect()
    }
}
