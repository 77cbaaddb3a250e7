//! Trip planning workflow
//!
//! Glues the catalog, the external services and the static generators into
//! one plan per render. Steps run strictly one after another; a failing
//! service only empties its own section of the plan.

pub mod budget;
pub mod hotels;
pub mod itinerary;

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::catalog;
use crate::chat::{HuggingFaceClient, LanguageModel, response_or_error};
use crate::config::{NavMindConfig, PlannerConfig};
use crate::encyclopedia::{Encyclopedia, WikipediaClient, summary_or_placeholder};
use crate::flights::{AviationStackClient, FlightSchedule};
use crate::geocoding::{Geocoder, LocationIqClient};
use crate::http;
use crate::models::{ChatExchange, CitySuggestions, MapView, Outcome, PreferenceSet, TripPlan};
use crate::weather::{OpenMeteoClient, WeatherProvider};
use crate::{NavMindError, Result};

pub use budget::allocate;
pub use hotels::recommend_hotels;
pub use itinerary::build_itinerary;

/// The external services a plan draws on
#[derive(Clone)]
pub struct Services {
    pub geocoder: Arc<dyn Geocoder>,
    pub weather: Arc<dyn WeatherProvider>,
    pub encyclopedia: Arc<dyn Encyclopedia>,
    pub flights: Arc<dyn FlightSchedule>,
    pub language_model: Arc<dyn LanguageModel>,
}

impl Services {
    /// Build the production HTTP clients from validated configuration
    pub fn from_config(config: &NavMindConfig) -> Result<Self> {
        let client = http::build_client(&config.http)?;
        let services = &config.services;

        Ok(Self {
            geocoder: Arc::new(LocationIqClient::new(
                client.clone(),
                &services.geocoding_url,
                &config.keys.locationiq,
            )),
            weather: Arc::new(OpenMeteoClient::new(
                client.clone(),
                &services.weather_url,
                config.planner.forecast_days,
            )),
            encyclopedia: Arc::new(WikipediaClient::new(
                client.clone(),
                &services.encyclopedia_url,
                config.planner.summary_sentences,
            )),
            flights: Arc::new(AviationStackClient::new(
                client.clone(),
                &services.flights_url,
                &config.keys.aviationstack,
                config.planner.flight_limit,
            )),
            language_model: Arc::new(HuggingFaceClient::new(
                client,
                &services.inference_url,
                &services.inference_model,
                &config.keys.huggingface,
            )),
        })
    }
}

pub struct TripPlanner {
    services: Services,
    settings: PlannerConfig,
}

impl TripPlanner {
    pub fn new(services: Services, settings: PlannerConfig) -> Self {
        Self { services, settings }
    }

    pub fn from_config(config: &NavMindConfig) -> Result<Self> {
        Ok(Self::new(
            Services::from_config(config)?,
            config.planner.clone(),
        ))
    }

    /// Candidate cities for the visitor's interest
    #[must_use]
    pub fn suggest(&self, preferences: &PreferenceSet) -> CitySuggestions {
        catalog::suggestions(&preferences.interest, preferences.season)
    }

    /// Assemble the full plan for a selected city
    #[instrument(
        skip(self, preferences),
        fields(
            travel_type = %preferences.travel_type,
            season = %preferences.season,
            interest = %preferences.interest,
            days = preferences.days.get()
        )
    )]
    pub async fn plan(&self, preferences: &PreferenceSet, city: &str) -> Result<TripPlan> {
        let city = city.trim();
        if city.is_empty() {
            return Err(NavMindError::validation("City cannot be empty"));
        }
        info!("Planning trip to {}", city);

        let summary = summary_or_placeholder(self.services.encyclopedia.summary(city).await);

        let (coordinates, location_note) = match self.services.geocoder.geocode(city).await {
            Ok(Some(coords)) => (Some(coords), None),
            Ok(None) => {
                warn!("No coordinates for {}, skipping map and forecast", city);
                (None, Some(format!("Could not locate {city} on the map.")))
            }
            Err(err) => {
                warn!("Geocoding {} failed: {}", city, err);
                (None, Some(err.to_string()))
            }
        };

        let weather = match coordinates {
            Some(coords) => Some(Outcome::from(
                self.services.weather.daily_forecast(coords).await,
            )),
            None => None,
        };

        let arrival_code = catalog::arrival_code(city);
        let flights = Outcome::from(
            self.services
                .flights
                .search(&preferences.departure_code, &arrival_code)
                .await,
        );

        Ok(TripPlan {
            city: city.to_string(),
            preferences: preferences.clone(),
            currency: self.settings.currency.clone(),
            summary,
            map: coordinates.map(|coords| MapView::centered_on(coords, city)),
            location_note,
            weather,
            itinerary: build_itinerary(city),
            budget: allocate(preferences.budget, preferences.days),
            hotels: recommend_hotels(city),
            arrival_code,
            flights,
        })
    }

    /// Forward a free-text prompt to the language model
    #[instrument(skip(self, prompt))]
    pub async fn refine(&self, prompt: &str) -> Result<ChatExchange> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(NavMindError::validation("Prompt cannot be empty"));
        }

        let response = response_or_error(self.services.language_model.generate(prompt).await);
        Ok(ChatExchange {
            prompt: prompt.to_string(),
            response,
        })
    }
}
