//! City name to coordinates via the LocationIQ search API

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::error::Service;
use crate::http::{self, check_status, read_json};
use crate::models::Coordinates;
use crate::{NavMindError, Result};

/// Resolves a city name to coordinates.
///
/// `Ok(None)` means the service found no match; `Err` means the lookup itself
/// failed.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, city: &str) -> Result<Option<Coordinates>>;
}

/// LocationIQ forward geocoding client
pub struct LocationIqClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// One match from `/v1/search`. LocationIQ sends coordinates as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl LocationIqClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

fn first_match(places: &[Place]) -> Result<Option<Coordinates>> {
    let Some(place) = places.first() else {
        return Ok(None);
    };

    let parse = |value: &str, what: &str| {
        value.trim().parse::<f64>().map_err(|_| {
            NavMindError::api(Service::Geocoding, format!("malformed {what} '{value}'"))
        })
    };
    let latitude = parse(&place.lat, "latitude")?;
    let longitude = parse(&place.lon, "longitude")?;

    Coordinates::new(latitude, longitude).map(Some).ok_or_else(|| {
        NavMindError::api(
            Service::Geocoding,
            format!("coordinates out of range: {latitude}, {longitude}"),
        )
    })
}

#[async_trait]
impl Geocoder for LocationIqClient {
    #[instrument(skip(self))]
    async fn geocode(&self, city: &str) -> Result<Option<Coordinates>> {
        info!("Geocoding city: '{}'", city);
        let start_time = Instant::now();

        let response = self
            .client
            .get(http::endpoint(&self.base_url, "v1/search"))
            .query(&[("key", self.api_key.as_str()), ("q", city), ("format", "json")])
            .send()
            .await
            .map_err(|e| NavMindError::transport(Service::Geocoding, &e))?;

        // LocationIQ answers "Unable to geocode" with a 404
        if response.status() == StatusCode::NOT_FOUND {
            warn!("No results found for city '{}'", city);
            return Ok(None);
        }

        let response = check_status(Service::Geocoding, response).await?;
        let places: Vec<Place> = read_json(Service::Geocoding, response).await?;
        let coordinates = first_match(&places)?;

        match (&coordinates, places.first()) {
            (Some(coords), Some(place)) => info!(
                "Resolved '{}' to {} ({}) in {:.3}s",
                city,
                coords.format_coordinates(),
                place.display_name.as_deref().unwrap_or("unnamed"),
                start_time.elapsed().as_secs_f64()
            ),
            _ => warn!("No results found for city '{}'", city),
        }

        Ok(coordinates)
    }
}
