//! Current weather and forecast lookup over an OpenWeather-style API.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{ToolsConfig, WeatherFallback};
use crate::error::ToolError;

/// Forecast points requested from and kept from the upstream service.
pub const FORECAST_POINTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    #[serde(default)]
    pub name: String,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub wind: Wind,
}

impl CurrentWeather {
    /// Description of the first reported condition.
    pub fn description(&self) -> &str {
        self.weather
            .first()
            .map(|c| c.description.as_str())
            .unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub list: Vec<ForecastPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub dt_txt: String,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

impl ForecastPoint {
    fn mock(dt_txt: &str, temp: f64, description: &str) -> Self {
        Self {
            dt_txt: dt_txt.to_string(),
            main: MainReadings {
                temp,
                feels_like: None,
                humidity: None,
            },
            weather: vec![Condition {
                main: None,
                description: description.to_string(),
            }],
        }
    }

    /// Description of the first reported condition.
    pub fn description(&self) -> &str {
        self.weather
            .first()
            .map(|c| c.description.as_str())
            .unwrap_or("unknown")
    }
}

fn mock_current(
    place: &str,
    temp: f64,
    feels_like: f64,
    humidity: f64,
    description: &str,
    main: &str,
    wind: f64,
) -> CurrentWeather {
    CurrentWeather {
        name: place.to_string(),
        main: MainReadings {
            temp,
            feels_like: Some(feels_like),
            humidity: Some(humidity),
        },
        weather: vec![Condition {
            main: Some(main.to_string()),
            description: description.to_string(),
        }],
        wind: Wind { speed: wind },
    }
}

/// Reading served when no API key is configured.
pub fn offline_current(place: &str) -> CurrentWeather {
    mock_current(place, 25.0, 27.0, 65.0, "partly cloudy", "Clouds", 3.5)
}

/// Reading served when the upstream call fails.
pub fn fallback_current(place: &str) -> CurrentWeather {
    mock_current(place, 22.0, 24.0, 60.0, "clear sky", "Clear", 2.5)
}

/// Forecast served when no API key is configured.
pub fn offline_forecast() -> Forecast {
    Forecast {
        list: vec![
            ForecastPoint::mock("2025-01-01 12:00:00", 24.0, "sunny"),
            ForecastPoint::mock("2025-01-02 12:00:00", 26.0, "partly cloudy"),
            ForecastPoint::mock("2025-01-03 12:00:00", 23.0, "light rain"),
        ],
    }
}

/// Forecast served when the upstream call fails.
pub fn fallback_forecast() -> Forecast {
    Forecast {
        list: vec![ForecastPoint::mock("2025-01-01 12:00:00", 22.0, "moderate weather")],
    }
}

/// Client for the weather service.
pub struct WeatherService {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    fallback: WeatherFallback,
}

impl WeatherService {
    /// Create a new weather client from the shared tool configuration.
    pub fn new(config: &ToolsConfig) -> Result<Self, ToolError> {
        Ok(Self {
            client: config.http_client()?,
            base_url: config.weather_url.trim_end_matches('/').to_string(),
            api_key: config.weather_api_key.clone(),
            fallback: config.weather_fallback,
        })
    }

    /// Whether real data can be requested.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Current conditions for a place.
    pub async fn current_weather(&self, place: &str) -> Result<CurrentWeather, ToolError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return match self.fallback {
                WeatherFallback::Mock => {
                    debug!("No weather API key, serving offline reading for {}", place);
                    Ok(offline_current(place))
                }
                WeatherFallback::Error => Err(missing_key()),
            };
        };

        match self.get::<CurrentWeather>("weather", place, api_key, &[]).await {
            Err(e) if self.recoverable(&e) => {
                warn!("Weather lookup for {} failed, serving fallback: {}", place, e);
                Ok(fallback_current(place))
            }
            other => other,
        }
    }

    /// Forecast for a place, at most [`FORECAST_POINTS`] entries.
    pub async fn forecast(&self, place: &str) -> Result<Forecast, ToolError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return match self.fallback {
                WeatherFallback::Mock => {
                    debug!("No weather API key, serving offline forecast for {}", place);
                    Ok(offline_forecast())
                }
                WeatherFallback::Error => Err(missing_key()),
            };
        };

        let count = FORECAST_POINTS.to_string();
        match self
            .get::<Forecast>("forecast", place, api_key, &[("cnt", count.as_str())])
            .await
        {
            Ok(mut forecast) => {
                forecast.list.truncate(FORECAST_POINTS);
                Ok(forecast)
            }
            Err(e) if self.recoverable(&e) => {
                warn!("Forecast lookup for {} failed, serving fallback: {}", place, e);
                Ok(fallback_forecast())
            }
            Err(e) => Err(e),
        }
    }

    /// Transport and decode failures fall back to mock data under the
    /// `Mock` policy; upstream status errors never do.
    fn recoverable(&self, error: &ToolError) -> bool {
        self.fallback == WeatherFallback::Mock
            && matches!(error, ToolError::HttpError(_) | ToolError::JsonError(_))
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        place: &str,
        api_key: &str,
        extra: &[(&str, &str)],
    ) -> Result<T, ToolError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        debug!("Fetching {} for {}", url, place);

        let response = self
            .client
            .get(&url)
            .query(&[("q", place), ("appid", api_key), ("units", "metric")])
            .query(extra)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Weather API returned status {}", response.status());
            return Err(ToolError::UpstreamStatus {
                service: "Weather API",
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn missing_key() -> ToolError {
    ToolError::Configuration("OPENWEATHERMAP_API_KEY is not set".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(url: &str, key: Option<&str>, fallback: WeatherFallback) -> WeatherService {
        let mut builder = ToolsConfig::builder()
            .weather_url(url)
            .weather_fallback(fallback)
            .http_timeout(Duration::from_secs(2));
        if let Some(key) = key {
            builder = builder.weather_api_key(key);
        }
        WeatherService::new(&builder.build()).unwrap()
    }

    #[tokio::test]
    async fn test_no_key_serves_offline_mock() {
        let weather = service("http://127.0.0.1:1", None, WeatherFallback::Mock);

        let current = weather.current_weather("Paris").await.unwrap();
        assert_eq!(current.name, "Paris");
        assert_eq!(current.main.temp, 25.0);
        assert_eq!(current.main.humidity, Some(65.0));
        assert_eq!(current.description(), "partly cloudy");
        assert_eq!(current.wind.speed, 3.5);

        let forecast = weather.forecast("Paris").await.unwrap();
        assert_eq!(forecast.list.len(), 3);
        assert_eq!(forecast.list[2].description(), "light rain");
    }

    #[tokio::test]
    async fn test_no_key_with_error_policy() {
        let weather = service("http://127.0.0.1:1", None, WeatherFallback::Error);

        assert!(matches!(
            weather.current_weather("Paris").await,
            Err(ToolError::Configuration(_))
        ));
        assert!(matches!(
            weather.forecast("Paris").await,
            Err(ToolError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_current_weather_from_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Goa"))
            .and(query_param("appid", "secret"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Goa",
                "main": {"temp": 31.2, "feels_like": 36.0, "humidity": 74, "pressure": 1008},
                "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds"}],
                "wind": {"speed": 4.1, "deg": 250}
            })))
            .mount(&server)
            .await;

        let weather = service(&server.uri(), Some("secret"), WeatherFallback::Mock);
        let current = weather.current_weather("Goa").await.unwrap();
        assert_eq!(current.main.temp, 31.2);
        assert_eq!(current.main.humidity, Some(74.0));
        assert_eq!(current.description(), "scattered clouds");
    }

    #[tokio::test]
    async fn test_forecast_capped() {
        let server = MockServer::start().await;
        let points: Vec<_> = (0..12)
            .map(|i| {
                json!({
                    "dt_txt": format!("2025-06-01 {:02}:00:00", i),
                    "main": {"temp": 20 + i},
                    "weather": [{"description": "clear sky"}]
                })
            })
            .collect();
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("cnt", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"list": points})))
            .mount(&server)
            .await;

        let weather = service(&server.uri(), Some("secret"), WeatherFallback::Mock);
        let forecast = weather.forecast("Goa").await.unwrap();
        assert_eq!(forecast.list.len(), FORECAST_POINTS);
        assert_eq!(forecast.list[0].main.temp, 20.0);
    }

    #[tokio::test]
    async fn test_status_error_never_mocked() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let weather = service(&server.uri(), Some("bad"), WeatherFallback::Mock);
        assert!(matches!(
            weather.current_weather("Goa").await,
            Err(ToolError::UpstreamStatus { status: 401, .. })
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_serves_fallback() {
        let weather = service("http://127.0.0.1:1", Some("secret"), WeatherFallback::Mock);

        let current = weather.current_weather("Lima").await.unwrap();
        assert_eq!(current, fallback_current("Lima"));

        let forecast = weather.forecast("Lima").await.unwrap();
        assert_eq!(forecast, fallback_forecast());
    }

    #[tokio::test]
    async fn test_decode_failure_serves_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let weather = service(&server.uri(), Some("secret"), WeatherFallback::Mock);
        let current = weather.current_weather("Lima").await.unwrap();
        assert_eq!(current.main.temp, 22.0);
        assert_eq!(current.description(), "clear sky");
    }

    #[tokio::test]
    async fn test_transport_failure_with_error_policy() {
        let weather = service("http://127.0.0.1:1", Some("secret"), WeatherFallback::Error);
        assert!(matches!(
            weather.current_weather("Lima").await,
            Err(ToolError::HttpError(_))
        ));
    }
}
