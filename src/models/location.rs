//! Coordinate pair and map view models

use serde::{Deserialize, Serialize};

/// Latitude/longitude in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Returns `None` when either value is out of range or not finite
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Interactive map centered on a resolved city
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    /// Marker popup text
    pub label: String,
}

impl MapView {
    pub const CITY_ZOOM: u8 = 12;

    #[must_use]
    pub fn centered_on(coordinates: Coordinates, label: &str) -> Self {
        Self {
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            zoom: Self::CITY_ZOOM,
            label: label.to_string(),
        }
    }
}
