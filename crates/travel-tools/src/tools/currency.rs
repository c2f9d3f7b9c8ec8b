//! Currency conversion tools over a shared [`CurrencyConverter`].

use std::fmt::Write;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::calculator::format_number;
use crate::currency::CurrencyConverter;
use crate::error::ToolError;
use crate::tool::{object_schema, Tool, ToolArgs, ToolOutput};

/// Converts an amount between two currencies.
///
/// Output: `100 USD = 85.00 EUR`. Upstream failures are reported as a
/// sentence the model can relay rather than as an error.
pub struct ConvertCurrency {
    converter: Arc<CurrencyConverter>,
}

impl ConvertCurrency {
    pub fn new(converter: Arc<CurrencyConverter>) -> Self {
        Self { converter }
    }
}

#[async_trait]
impl Tool for ConvertCurrency {
    fn name(&self) -> &str {
        "convert_currency"
    }

    fn description(&self) -> &str {
        "Convert amount from one currency to another. Use 3-letter currency codes like USD, EUR, GBP, etc."
    }

    fn parameters(&self) -> Value {
        object_schema(&[
            ("amount", "number", "Amount to convert"),
            ("from_currency", "string", "Source currency code, e.g. USD"),
            ("to_currency", "string", "Target currency code, e.g. EUR"),
        ])
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let amount = args.get_f64("amount")?;
        let from = args.get_string("from_currency")?;
        let to = args.get_string("to_currency")?;

        match self.converter.convert(amount, &from, &to).await {
            Ok(converted) => Ok(ToolOutput::success(format!(
                "{} {} = {:.2} {}",
                format_number(amount),
                from.to_uppercase(),
                converted,
                to.to_uppercase()
            ))),
            Err(e) => {
                warn!("Conversion {} -> {} failed: {}", from, to, e);
                Ok(ToolOutput::success(format!(
                    "Unable to convert {} to {}. Please check currency codes.",
                    from, to
                )))
            }
        }
    }
}

/// Current rate between two currencies.
///
/// Output: `1 USD = 0.8500 EUR`
pub struct GetExchangeRate {
    converter: Arc<CurrencyConverter>,
}

impl GetExchangeRate {
    pub fn new(converter: Arc<CurrencyConverter>) -> Self {
        Self { converter }
    }
}

#[async_trait]
impl Tool for GetExchangeRate {
    fn name(&self) -> &str {
        "get_exchange_rate"
    }

    fn description(&self) -> &str {
        "Get current exchange rate between two currencies"
    }

    fn parameters(&self) -> Value {
        object_schema(&[
            ("from_currency", "string", "Source currency code, e.g. USD"),
            ("to_currency", "string", "Target currency code, e.g. EUR"),
        ])
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let from = args.get_string("from_currency")?;
        let to = args.get_string("to_currency")?;

        match self.converter.exchange_rate(&from, &to).await {
            Ok(rate) => Ok(ToolOutput::success(format!(
                "1 {} = {:.4} {}",
                from.to_uppercase(),
                rate,
                to.to_uppercase()
            ))),
            Err(e) => {
                warn!("Exchange rate {} -> {} failed: {}", from, to, e);
                Ok(ToolOutput::success(format!(
                    "Unable to get exchange rate for {} to {}",
                    from, to
                )))
            }
        }
    }
}

/// The fixed list of supported currencies.
pub struct GetSupportedCurrencies {
    converter: Arc<CurrencyConverter>,
}

impl GetSupportedCurrencies {
    pub fn new(converter: Arc<CurrencyConverter>) -> Self {
        Self { converter }
    }
}

#[async_trait]
impl Tool for GetSupportedCurrencies {
    fn name(&self) -> &str {
        "get_supported_currencies"
    }

    fn description(&self) -> &str {
        "Get list of supported currencies with their full names"
    }

    fn parameters(&self) -> Value {
        object_schema(&[])
    }

    async fn execute(&self, _args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let mut output = String::from("Supported currencies:\n");
        for (code, name) in self.converter.supported_currencies() {
            let _ = writeln!(output, "- {}: {}", code, name);
        }
        Ok(ToolOutput::success(output))
    }
}

/// Converts one amount into several currencies with a single rate lookup.
pub struct ConvertMultipleCurrencies {
    converter: Arc<CurrencyConverter>,
}

impl ConvertMultipleCurrencies {
    pub fn new(converter: Arc<CurrencyConverter>) -> Self {
        Self { converter }
    }
}

#[async_trait]
impl Tool for ConvertMultipleCurrencies {
    fn name(&self) -> &str {
        "convert_multiple_currencies"
    }

    fn description(&self) -> &str {
        "Convert amount to multiple currencies. Provide to_currencies as comma-separated string (e.g., 'USD,EUR,GBP')"
    }

    fn parameters(&self) -> Value {
        object_schema(&[
            ("amount", "number", "Amount to convert"),
            ("from_currency", "string", "Source currency code, e.g. USD"),
            ("to_currencies", "string", "Comma-separated target codes, e.g. EUR,GBP,JPY"),
        ])
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let amount = args.get_f64("amount")?;
        let from = args.get_string("from_currency")?;
        let targets = args.get_list("to_currencies")?;

        let rates = match self.converter.multiple_rates(&from, &targets).await {
            Ok(rates) => rates,
            Err(e) => {
                warn!("Rate lookup for {} failed: {}", from, e);
                targets.iter().map(|code| (code.to_uppercase(), None)).collect()
            }
        };

        let mut output = format!("Converting {} {}:\n", format_number(amount), from.to_uppercase());
        for (code, rate) in rates {
            match rate {
                Some(rate) => {
                    let _ = writeln!(output, "- {}: {:.2}", code, amount * rate);
                }
                None => {
                    let _ = writeln!(output, "- {}: Unable to convert", code);
                }
            }
        }
        Ok(ToolOutput::success(output))
    }
}
