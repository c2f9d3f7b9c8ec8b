//! Weather tools over a shared [`WeatherService`].

use std::fmt::Write;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::calculator::format_number;
use crate::error::ToolError;
use crate::tool::{object_schema, Tool, ToolArgs, ToolOutput};
use crate::weather::{CurrentWeather, Forecast, WeatherService};

fn city_schema() -> Value {
    object_schema(&[("city", "string", "City name, e.g. \"Paris\" or \"Goa, IN\"")])
}

fn render_current(city: &str, weather: &CurrentWeather) -> String {
    let name = if weather.name.is_empty() {
        city
    } else {
        weather.name.as_str()
    };

    let mut output = format!("Current weather in {}:\n", name);
    let _ = write!(output, "- Temperature: {}°C", format_number(weather.main.temp));
    if let Some(feels_like) = weather.main.feels_like {
        let _ = write!(output, " (feels like {}°C)", format_number(feels_like));
    }
    output.push('\n');
    let _ = writeln!(output, "- Conditions: {}", weather.description());
    if let Some(humidity) = weather.main.humidity {
        let _ = writeln!(output, "- Humidity: {}%", format_number(humidity));
    }
    let _ = write!(output, "- Wind speed: {} m/s", format_number(weather.wind.speed));
    output
}

fn render_forecast(city: &str, forecast: &Forecast) -> String {
    if forecast.list.is_empty() {
        return format!("No forecast available for {}", city);
    }

    let mut output = format!("Weather forecast for {}:\n", city);
    for point in &forecast.list {
        let _ = writeln!(
            output,
            "- {}: {}°C, {}",
            point.dt_txt,
            format_number(point.main.temp),
            point.description()
        );
    }
    output
}

/// Current conditions for a city.
pub struct GetCurrentWeather {
    weather: Arc<WeatherService>,
}

impl GetCurrentWeather {
    pub fn new(weather: Arc<WeatherService>) -> Self {
        Self { weather }
    }
}

#[async_trait]
impl Tool for GetCurrentWeather {
    fn name(&self) -> &str {
        "get_current_weather"
    }

    fn description(&self) -> &str {
        "Get current weather for a city"
    }

    fn parameters(&self) -> Value {
        city_schema()
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let city = args.get_string("city")?;
        let weather = self.weather.current_weather(&city).await?;
        Ok(ToolOutput::success(render_current(&city, &weather)))
    }
}

/// Multi-point forecast for a city.
pub struct GetWeatherForecast {
    weather: Arc<WeatherService>,
}

impl GetWeatherForecast {
    pub fn new(weather: Arc<WeatherService>) -> Self {
        Self { weather }
    }
}

#[async_trait]
impl Tool for GetWeatherForecast {
    fn name(&self) -> &str {
        "get_weather_forecast"
    }

    fn description(&self) -> &str {
        "Get weather forecast for a city"
    }

    fn parameters(&self) -> Value {
        city_schema()
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let city = args.get_string("city")?;
        let forecast = self.weather.forecast(&city).await?;
        Ok(ToolOutput::success(render_forecast(&city, &forecast)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ToolsConfig, WeatherFallback};
    use serde_json::json;

    fn args(city: &str) -> ToolArgs {
        ToolArgs::new(serde_json::from_value(json!({ "city": city })).unwrap())
    }

    fn offline(fallback: WeatherFallback) -> Arc<WeatherService> {
        let config = ToolsConfig::builder()
            .weather_url("http://127.0.0.1:1")
            .weather_fallback(fallback)
            .build();
        Arc::new(WeatherService::new(&config).unwrap())
    }

    #[tokio::test]
    async fn test_current_weather_mock() {
        let result = GetCurrentWeather::new(offline(WeatherFallback::Mock))
            .execute(args("Paris"))
            .await
            .unwrap();

        assert_eq!(
            result.content,
            "Current weather in Paris:\n\
             - Temperature: 25°C (feels like 27°C)\n\
             - Conditions: partly cloudy\n\
             - Humidity: 65%\n\
             - Wind speed: 3.5 m/s"
        );
    }

    #[tokio::test]
    async fn test_forecast_mock() {
        let result = GetWeatherForecast::new(offline(WeatherFallback::Mock))
            .execute(args("Paris"))
            .await
            .unwrap();

        assert_eq!(
            result.content,
            "Weather forecast for Paris:\n\
             - 2025-01-01 12:00:00: 24°C, sunny\n\
             - 2025-01-02 12:00:00: 26°C, partly cloudy\n\
             - 2025-01-03 12:00:00: 23°C, light rain\n"
        );
    }

    #[tokio::test]
    async fn test_error_policy_surfaces() {
        let result = GetCurrentWeather::new(offline(WeatherFallback::Error))
            .execute(args("Paris"))
            .await;
        assert!(matches!(result, Err(ToolError::Configuration(_))));
    }

    #[test]
    fn test_render_forecast_empty() {
        let forecast = Forecast { list: Vec::new() };
        assert_eq!(render_forecast("Oslo", &forecast), "No forecast available for Oslo");
    }
}
