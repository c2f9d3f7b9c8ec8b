//! Place search tools over a shared [`PlaceInfoSearch`].

use std::fmt::Write;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::calculator::format_number;
use crate::error::ToolError;
use crate::places::{PlaceDetails, PlaceInfoSearch, PlaceRecord, BUNDLE_SECTION_LIMIT};
use crate::tool::{object_schema, Tool, ToolArgs, ToolOutput};

fn place_name_schema() -> Value {
    object_schema(&[("place_name", "string", "Name of the city, region or place")])
}

fn coordinate(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn record_name(record: &PlaceRecord) -> &str {
    if record.name.is_empty() {
        "Unknown"
    } else {
        &record.name
    }
}

fn render_details(place_name: &str, details: &PlaceDetails) -> String {
    format!(
        "Place Information for {}:\n\
         - Full Name: {}\n\
         - Type: {}\n\
         - Category: {}\n\
         - Country: {}\n\
         - State/Region: {}\n\
         - City: {}\n\
         - Coordinates: {}, {}\n\
         - Importance Score: {}",
        place_name,
        details.name,
        details.kind,
        details.category,
        details.country,
        details.state,
        details.city,
        coordinate(details.latitude),
        coordinate(details.longitude),
        format_number(details.importance),
    )
}

/// Numbered list with the road of each entry when known.
fn render_with_addresses(heading: &str, records: &[PlaceRecord]) -> String {
    let mut output = format!("{}:\n\n", heading);
    for (i, record) in records.iter().take(BUNDLE_SECTION_LIMIT).enumerate() {
        let _ = writeln!(output, "{}. {}", i + 1, record_name(record));
        if let Some(road) = record.address.road.as_deref().filter(|r| !r.is_empty()) {
            let _ = writeln!(output, "   Address: {}", road);
        }
        output.push('\n');
    }
    output
}

/// Basic facts about a place.
pub struct SearchPlaceInfo {
    search: Arc<PlaceInfoSearch>,
}

impl SearchPlaceInfo {
    pub fn new(search: Arc<PlaceInfoSearch>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for SearchPlaceInfo {
    fn name(&self) -> &str {
        "search_place_info"
    }

    fn description(&self) -> &str {
        "Get basic information about a place including location, type, and address"
    }

    fn parameters(&self) -> Value {
        place_name_schema()
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let place_name = args.get_string("place_name")?;

        let output = match self.search.place_details(&place_name).await {
            Ok(Some(details)) => render_details(&place_name, &details),
            Ok(None) => format!("No information found for {}", place_name),
            Err(e) => {
                warn!("Place info lookup for '{}' failed: {}", place_name, e);
                format!("No information found for {}", place_name)
            }
        };
        Ok(ToolOutput::success(output))
    }
}

/// Top tourist attractions near a place.
pub struct SearchTouristAttractions {
    search: Arc<PlaceInfoSearch>,
}

impl SearchTouristAttractions {
    pub fn new(search: Arc<PlaceInfoSearch>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for SearchTouristAttractions {
    fn name(&self) -> &str {
        "search_tourist_attractions"
    }

    fn description(&self) -> &str {
        "Find tourist attractions and points of interest near a place"
    }

    fn parameters(&self) -> Value {
        place_name_schema()
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let place_name = args.get_string("place_name")?;
        let attractions = self
            .search
            .nearby_attractions(&place_name)
            .await
            .unwrap_or_else(|e| {
                warn!("Attraction search for '{}' failed: {}", place_name, e);
                Vec::new()
            });

        if attractions.is_empty() {
            return Ok(ToolOutput::success(format!(
                "No tourist attractions found near {}",
                place_name
            )));
        }

        let mut output = format!("Tourist Attractions near {}:\n\n", place_name);
        for (i, attraction) in attractions.iter().take(BUNDLE_SECTION_LIMIT).enumerate() {
            let _ = write!(
                output,
                "{}. {}\n   Type: {}\n\n",
                i + 1,
                record_name(attraction),
                attraction.kind.as_deref().unwrap_or("Unknown")
            );
        }
        Ok(ToolOutput::success(output))
    }
}

/// Restaurants in a place.
pub struct SearchRestaurants {
    search: Arc<PlaceInfoSearch>,
}

impl SearchRestaurants {
    pub fn new(search: Arc<PlaceInfoSearch>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for SearchRestaurants {
    fn name(&self) -> &str {
        "search_restaurants"
    }

    fn description(&self) -> &str {
        "Find restaurants and dining options in a place"
    }

    fn parameters(&self) -> Value {
        place_name_schema()
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let place_name = args.get_string("place_name")?;
        let restaurants = self
            .search
            .restaurants(&place_name)
            .await
            .unwrap_or_else(|e| {
                warn!("Restaurant search for '{}' failed: {}", place_name, e);
                Vec::new()
            });

        if restaurants.is_empty() {
            return Ok(ToolOutput::success(format!(
                "No restaurants found in {}",
                place_name
            )));
        }
        Ok(ToolOutput::success(render_with_addresses(
            &format!("Restaurants in {}", place_name),
            &restaurants,
        )))
    }
}

/// Hotels in a place.
pub struct SearchHotels {
    search: Arc<PlaceInfoSearch>,
}

impl SearchHotels {
    pub fn new(search: Arc<PlaceInfoSearch>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for SearchHotels {
    fn name(&self) -> &str {
        "search_hotels"
    }

    fn description(&self) -> &str {
        "Find hotels and accommodation options in a place"
    }

    fn parameters(&self) -> Value {
        place_name_schema()
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let place_name = args.get_string("place_name")?;
        let hotels = self.search.hotels(&place_name).await.unwrap_or_else(|e| {
            warn!("Hotel search for '{}' failed: {}", place_name, e);
            Vec::new()
        });

        if hotels.is_empty() {
            return Ok(ToolOutput::success(format!("No hotels found in {}", place_name)));
        }
        Ok(ToolOutput::success(render_with_addresses(
            &format!("Hotels in {}", place_name),
            &hotels,
        )))
    }
}

/// Markdown overview combining details, attractions, restaurants and hotels.
pub struct GetComprehensiveTravelInfo {
    search: Arc<PlaceInfoSearch>,
}

impl GetComprehensiveTravelInfo {
    pub fn new(search: Arc<PlaceInfoSearch>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for GetComprehensiveTravelInfo {
    fn name(&self) -> &str {
        "get_comprehensive_travel_info"
    }

    fn description(&self) -> &str {
        "Get comprehensive travel information including attractions, restaurants, and hotels for a place"
    }

    fn parameters(&self) -> Value {
        place_name_schema()
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let place_name = args.get_string("place_name")?;
        let bundle = self.search.travel_info(&place_name).await;

        if bundle.is_empty() {
            return Ok(ToolOutput::success(format!(
                "No travel information found for {}",
                place_name
            )));
        }

        let mut output = format!("# Comprehensive Travel Information for {}\n\n", place_name);

        if let Some(details) = &bundle.place_details {
            output.push_str("## Basic Information\n");
            let _ = writeln!(output, "- Location: {}, {}", details.country, details.state);
            let _ = writeln!(output, "- Type: {}", details.kind);
            let _ = writeln!(
                output,
                "- Coordinates: {}, {}\n",
                coordinate(details.latitude),
                coordinate(details.longitude)
            );
        }

        for (heading, records) in [
            ("Top Attractions", &bundle.attractions),
            ("Restaurants", &bundle.restaurants),
            ("Hotels", &bundle.hotels),
        ] {
            if records.is_empty() {
                continue;
            }
            let _ = writeln!(output, "## {}", heading);
            for (i, record) in records.iter().enumerate() {
                let _ = writeln!(output, "{}. {}", i + 1, record_name(record));
            }
            output.push('\n');
        }

        Ok(ToolOutput::success(output))
    }
}
