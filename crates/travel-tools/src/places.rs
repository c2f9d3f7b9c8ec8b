//! Place and point-of-interest search over a Nominatim-style geocoder.

use std::time::Duration;

use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::config::ToolsConfig;
use crate::error::ToolError;

/// Results returned by the attraction, restaurant and hotel searches.
const POI_LIMIT: usize = 10;

/// Entries kept per section of a [`TravelInfoBundle`].
pub const BUNDLE_SECTION_LIMIT: usize = 5;

const UNKNOWN: &str = "Unknown";

/// Address components of a geocode hit.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlaceAddress {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub road: Option<String>,
}

/// A single geocode or point-of-interest hit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaceRecord {
    /// Full display name.
    #[serde(rename = "display_name", default)]
    pub name: String,

    #[serde(default, deserialize_with = "coordinate")]
    pub lat: Option<f64>,

    #[serde(default, deserialize_with = "coordinate")]
    pub lon: Option<f64>,

    /// Place type (`city`, `museum`, ...).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// Place class (`boundary`, `tourism`, ...).
    #[serde(rename = "class", default)]
    pub category: Option<String>,

    #[serde(default)]
    pub importance: Option<f64>,

    #[serde(default)]
    pub address: PlaceAddress,
}

/// Nominatim sends coordinates as strings; accept numbers too.
fn coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// Summary of the best geocode hit for a place name.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetails {
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub kind: String,
    pub category: String,
    pub importance: f64,
    pub country: String,
    pub state: String,
    pub city: String,
}

impl From<PlaceRecord> for PlaceDetails {
    fn from(record: PlaceRecord) -> Self {
        let or_unknown = |value: Option<String>| value.unwrap_or_else(|| UNKNOWN.to_string());
        Self {
            name: if record.name.is_empty() {
                UNKNOWN.to_string()
            } else {
                record.name
            },
            latitude: record.lat,
            longitude: record.lon,
            kind: or_unknown(record.kind),
            category: or_unknown(record.category),
            importance: record.importance.unwrap_or(0.0),
            country: or_unknown(record.address.country),
            state: or_unknown(record.address.state),
            city: or_unknown(record.address.city),
        }
    }
}

/// Everything known about a destination, each list holding at most
/// [`BUNDLE_SECTION_LIMIT`] entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelInfoBundle {
    pub place_details: Option<PlaceDetails>,
    pub attractions: Vec<PlaceRecord>,
    pub restaurants: Vec<PlaceRecord>,
    pub hotels: Vec<PlaceRecord>,
}

impl TravelInfoBundle {
    /// True when no section has any data.
    pub fn is_empty(&self) -> bool {
        self.place_details.is_none()
            && self.attractions.is_empty()
            && self.restaurants.is_empty()
            && self.hotels.is_empty()
    }
}

/// Client for the place search service.
///
/// Every request is followed by a fixed pause to respect the fair-use
/// policy of the public geocoder. Failed requests are not retried.
pub struct PlaceInfoSearch {
    client: reqwest::Client,
    base_url: String,
    pause: Duration,
}

impl PlaceInfoSearch {
    /// Create a new search client from the shared tool configuration.
    pub fn new(config: &ToolsConfig) -> Result<Self, ToolError> {
        Ok(Self {
            client: config.http_client()?,
            base_url: config.nominatim_url.trim_end_matches('/').to_string(),
            pause: config.place_search_pause,
        })
    }

    /// Free-text search returning at most `limit` hits.
    pub async fn search_place(&self, query: &str, limit: usize) -> Result<Vec<PlaceRecord>, ToolError> {
        let result = self.fetch(query, limit).await;
        if !self.pause.is_zero() {
            tokio::time::sleep(self.pause).await;
        }
        result
    }

    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<PlaceRecord>, ToolError> {
        let url = format!("{}/search", self.base_url);
        let limit = limit.to_string();

        debug!("Searching places: q='{}' limit={}", query, limit);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("addressdetails", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Place search returned status {}", response.status());
            return Err(ToolError::UpstreamStatus {
                service: "Place search",
                status: response.status().as_u16(),
            });
        }

        let records: Vec<PlaceRecord> = response.json().await?;
        debug!("Place search returned {} results", records.len());
        Ok(records)
    }

    /// Details of the best match for a place name, `None` when nothing matched.
    pub async fn place_details(&self, place_name: &str) -> Result<Option<PlaceDetails>, ToolError> {
        let mut places = self.search_place(place_name, 1).await?;
        if places.is_empty() {
            return Ok(None);
        }
        Ok(Some(places.swap_remove(0).into()))
    }

    /// Tourist attractions near a place.
    ///
    /// The place is resolved first; an unresolvable place or one without
    /// coordinates yields no attractions.
    pub async fn nearby_attractions(&self, place_name: &str) -> Result<Vec<PlaceRecord>, ToolError> {
        let Some(details) = self.place_details(place_name).await? else {
            return Ok(Vec::new());
        };
        if details.latitude.is_none() || details.longitude.is_none() {
            return Ok(Vec::new());
        }

        self.search_place(&format!("tourist attraction near {}", place_name), POI_LIMIT)
            .await
    }

    /// Restaurants in a place.
    pub async fn restaurants(&self, place_name: &str) -> Result<Vec<PlaceRecord>, ToolError> {
        self.search_place(&format!("restaurant {}", place_name), POI_LIMIT)
            .await
    }

    /// Hotels in a place.
    pub async fn hotels(&self, place_name: &str) -> Result<Vec<PlaceRecord>, ToolError> {
        self.search_place(&format!("hotel {}", place_name), POI_LIMIT)
            .await
    }

    /// Details, attractions, restaurants and hotels in one bundle.
    ///
    /// Never fails: each section that cannot be fetched is left empty.
    pub async fn travel_info(&self, place_name: &str) -> TravelInfoBundle {
        let place_details = self
            .place_details(place_name)
            .await
            .unwrap_or_else(|e| {
                warn!("Place details for '{}' unavailable: {}", place_name, e);
                None
            });

        let attractions = section("attractions", place_name, self.nearby_attractions(place_name).await);
        let restaurants = section("restaurants", place_name, self.restaurants(place_name).await);
        let hotels = section("hotels", place_name, self.hotels(place_name).await);

        TravelInfoBundle {
            place_details,
            attractions,
            restaurants,
            hotels,
        }
    }
}

fn section(
    label: &str,
    place_name: &str,
    result: Result<Vec<PlaceRecord>, ToolError>,
) -> Vec<PlaceRecord> {
    match result {
        Ok(mut records) => {
            records.truncate(BUNDLE_SECTION_LIMIT);
            records
        }
        Err(e) => {
            warn!("Search for {} in '{}' failed: {}", label, place_name, e);
            Vec::new()
        }
    }
}
