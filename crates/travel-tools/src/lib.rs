//! Travel data clients and the tools the trip planner agent calls.
//!
//! The crate has two layers:
//!
//! - **Clients** talk to upstream services and return typed results:
//!   [`Calculator`], [`CurrencyConverter`], [`PlaceInfoSearch`] and
//!   [`WeatherService`]. All of them are built from one [`ToolsConfig`].
//! - **Tools** ([`tools`]) wrap client operations as named,
//!   described functions with a JSON Schema. A [`ToolRegistry`] holds them
//!   and a [`RegistryToolExecutor`] exposes the registry to an agent
//!   runtime, turning every failure into `Error: ...` text.
//!
//! # Example
//!
//! ```rust,ignore
//! use travel_tools::{default_registry, ToolsConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), travel_tools::ToolError> {
//!     let registry = default_registry(&ToolsConfig::from_env()?)?;
//!
//!     let result = registry
//!         .execute_json("calculate_per_person_cost", r#"{"total_cost": 300, "num_people": 3}"#)
//!         .await?;
//!     println!("{}", result.content); // "Cost per person: 100 (Total: 300, People: 3)"
//!     Ok(())
//! }
//! ```

pub mod calculator;
mod config;
pub mod currency;
mod error;
mod executor;
pub mod places;
mod registry;
mod tool;
pub mod tools;
pub mod weather;

use std::sync::Arc;

use tracing::info;

pub use calculator::{Calculator, CalculatorError};
pub use config::{ToolsConfig, ToolsConfigBuilder, WeatherFallback};
pub use currency::{CurrencyConverter, ExchangeRateTable};
pub use error::ToolError;
pub use executor::RegistryToolExecutor;
pub use places::{PlaceDetails, PlaceInfoSearch, PlaceRecord, TravelInfoBundle};
pub use registry::ToolRegistry;
pub use tool::{object_schema, Tool, ToolArgs, ToolOutput};
pub use weather::{CurrentWeather, Forecast, WeatherService};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

/// Create a registry with every travel tool registered.
///
/// Clients are built once here and shared between the tools that use them.
pub fn default_registry(config: &ToolsConfig) -> Result<ToolRegistry, ToolError> {
    let converter = Arc::new(CurrencyConverter::new(config)?);
    let places = Arc::new(PlaceInfoSearch::new(config)?);
    let weather = Arc::new(WeatherService::new(config)?);
    if !weather.has_api_key() {
        info!(
            "OPENWEATHERMAP_API_KEY not set, weather tools follow the {:?} fallback",
            config.weather_fallback
        );
    }

    let mut registry = ToolRegistry::new();

    // Weather
    registry.register(tools::GetCurrentWeather::new(weather.clone()));
    registry.register(tools::GetWeatherForecast::new(weather));

    // Places
    registry.register(tools::SearchPlaceInfo::new(places.clone()));
    registry.register(tools::SearchTouristAttractions::new(places.clone()));
    registry.register(tools::SearchRestaurants::new(places.clone()));
    registry.register(tools::SearchHotels::new(places.clone()));
    registry.register(tools::GetComprehensiveTravelInfo::new(places));

    // Expense calculator
    registry.register(tools::AddNumbers::new());
    registry.register(tools::MultiplyNumbers::new());
    registry.register(tools::CalculatePercentage::new());
    registry.register(tools::CalculateTotalExpenses::new());
    registry.register(tools::CalculatePerPersonCost::new());
    registry.register(tools::CalculateDailyBudget::new());

    // Currency
    registry.register(tools::ConvertCurrency::new(converter.clone()));
    registry.register(tools::GetExchangeRate::new(converter.clone()));
    registry.register(tools::ConvertMultipleCurrencies::new(converter.clone()));
    registry.register(tools::GetSupportedCurrencies::new(converter));

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trip_core::{ToolExecutor, ToolRequest, SYSTEM_PROMPT};

    #[test]
    fn test_default_registry_names() {
        let registry = default_registry(&ToolsConfig::default()).unwrap();
        assert_eq!(registry.len(), 17);

        for name in registry.list_tools() {
            assert!(SYSTEM_PROMPT.contains(name), "prompt does not mention {}", name);
        }
    }

    #[test]
    fn test_definitions_have_schemas() {
        let registry = default_registry(&ToolsConfig::default()).unwrap();
        for def in registry.definitions() {
            assert_eq!(def.tool_type, "function");
            assert_eq!(def.function.parameters["type"], "object");
            assert!(def.function.description.is_some());
        }
    }

    #[tokio::test]
    async fn test_executor_over_default_registry() {
        let registry = default_registry(&ToolsConfig::default()).unwrap();
        let executor = RegistryToolExecutor::new(registry);

        let request = ToolRequest::from_call(
            "call-1".to_string(),
            "calculate_per_person_cost".to_string(),
            r#"{"total_cost": 300, "num_people": 0}"#,
        )
        .unwrap();

        let result = executor.execute(request).await;
        assert!(!result.success);
        assert_eq!(result.content, "Error: Number of people must be greater than 0");
    }
}
