//! Data models for the NavMind application
//!
//! Every value here is request-scoped and lives for one render:
//! - Preferences: what the visitor asked for
//! - Location: coordinates and the map view built from them
//! - Weather: per-day forecast records
//! - Trip: itinerary, budget, hotels, flights and the assembled plan

pub mod location;
pub mod preferences;
pub mod trip;
pub mod weather;

// Re-export all public types for convenient access
pub use location::{Coordinates, MapView};
pub use preferences::{PreferenceSet, Season, TravelType};
pub use trip::{
    BudgetBreakdown, ChatExchange, CitySuggestions, FlightEntry, HotelEntry, ItineraryEntry,
    Outcome, TripPlan,
};
pub use weather::ForecastDay;
