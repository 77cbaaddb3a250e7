//! `NavMind` - travel planning dashboard
//!
//! This library suggests cities for a travel interest and assembles a trip
//! plan from geocoding, weather, encyclopedia and flight services, plus
//! refinement through a hosted language model.

pub mod catalog;
pub mod chat;
pub mod config;
pub mod encyclopedia;
pub mod error;
pub mod flights;
pub mod geocoding;
pub mod http;
pub mod models;
pub mod planner;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::NavMindConfig;
pub use error::{NavMindError, Service};
pub use models::{Coordinates, ForecastDay, Outcome, PreferenceSet, TripPlan};
pub use planner::{Services, TripPlanner};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, NavMindError>;
