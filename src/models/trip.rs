//! Trip plan models assembled for one dashboard render

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::{ForecastDay, MapView, PreferenceSet};
use crate::Result;

/// Result of one external lookup inside a plan: data or the reason it failed
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Ok { data: T },
    Failed { reason: String },
}

impl<T> Outcome<T> {
    pub fn failed<S: Into<String>>(reason: S) -> Self {
        Outcome::Failed {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            Outcome::Ok { data } => Some(data),
            Outcome::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

impl<T> From<Result<T>> for Outcome<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Outcome::Ok { data },
            Err(err) => Outcome::failed(err.to_string()),
        }
    }
}

/// Candidate cities for an interest
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CitySuggestions {
    pub interest: String,
    pub cities: Vec<String>,
    /// True when the interest was not in the catalog
    pub fallback: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ItineraryEntry {
    /// 1-based
    pub day: u32,
    pub plan: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BudgetBreakdown {
    pub total: f64,
    pub per_day: f64,
    pub days: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HotelEntry {
    pub name: String,
    /// Nightly price in the configured currency
    pub price: u32,
    pub rating: f32,
}

/// A scheduled flight. Any nested field the service left null stays `None`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FlightEntry {
    pub airline: Option<String>,
    pub flight_number: Option<String>,
    pub departure: Option<DateTime<FixedOffset>>,
    pub arrival: Option<DateTime<FixedOffset>>,
}

/// A single refine prompt and its reply; no history is kept
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatExchange {
    pub prompt: String,
    pub response: String,
}

/// Everything the dashboard shows for the selected city
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TripPlan {
    pub city: String,
    pub preferences: PreferenceSet,
    pub currency: String,
    pub summary: String,
    /// Present only when geocoding resolved the city
    pub map: Option<MapView>,
    /// Why the map and forecast were skipped
    pub location_note: Option<String>,
    /// Absent when there were no coordinates to forecast for
    pub weather: Option<Outcome<Vec<ForecastDay>>>,
    pub itinerary: Vec<ItineraryEntry>,
    pub budget: BudgetBreakdown,
    pub hotels: Vec<HotelEntry>,
    pub arrival_code: String,
    pub flights: Outcome<Vec<FlightEntry>>,
}
