//! Shared helpers: fake upstream services and stub planner services

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use chrono::NaiveDate;
use navmind::chat::LanguageModel;
use navmind::config::PlannerConfig;
use navmind::encyclopedia::Encyclopedia;
use navmind::flights::FlightSchedule;
use navmind::geocoding::Geocoder;
use navmind::models::FlightEntry;
use navmind::weather::WeatherProvider;
use navmind::{Coordinates, ForecastDay, NavMindError, Result, Service, Services, TripPlanner};

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake upstream");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("fake upstream");
    });
    format!("http://{addr}")
}

/// HTTP client that never goes through an environment proxy
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("build client")
}

/// Base URL nothing is listening on
pub const UNREACHABLE: &str = "http://127.0.0.1:9";

pub struct StubServices {
    pub coordinates: Option<Coordinates>,
    pub flights: Vec<FlightEntry>,
    pub fail_flights: bool,
}

impl Default for StubServices {
    fn default() -> Self {
        Self {
            coordinates: Coordinates::new(15.4989, 73.8278),
            flights: vec![],
            fail_flights: false,
        }
    }
}

#[async_trait]
impl Geocoder for StubServices {
    async fn geocode(&self, _city: &str) -> Result<Option<Coordinates>> {
        Ok(self.coordinates)
    }
}

#[async_trait]
impl WeatherProvider for StubServices {
    async fn daily_forecast(&self, _coordinates: Coordinates) -> Result<Vec<ForecastDay>> {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).expect("date");
        Ok((0..7)
            .map(|offset| ForecastDay {
                date: start + chrono::Days::new(offset),
                temp_max: Some(31.0),
                temp_min: Some(25.0),
                precipitation: Some(2.5),
            })
            .collect())
    }
}

#[async_trait]
impl Encyclopedia for StubServices {
    async fn summary(&self, title: &str) -> Result<String> {
        Ok(format!("{title} is known for its beaches."))
    }
}

#[async_trait]
impl FlightSchedule for StubServices {
    async fn search(&self, _departure: &str, _arrival: &str) -> Result<Vec<FlightEntry>> {
        if self.fail_flights {
            return Err(NavMindError::api(Service::Flights, "invalid_access_key"));
        }
        Ok(self.flights.clone())
    }
}

#[async_trait]
impl LanguageModel for StubServices {
    async fn generate(&self, prompt: &str) -> Result<String> {
        Ok(format!("Sure! {prompt}"))
    }
}

pub fn stub_planner(stub: StubServices) -> TripPlanner {
    let stub = Arc::new(stub);
    let services = Services {
        geocoder: stub.clone(),
        weather: stub.clone(),
        encyclopedia: stub.clone(),
        flights: stub.clone(),
        language_model: stub,
    };
    TripPlanner::new(services, PlannerConfig::default())
}
