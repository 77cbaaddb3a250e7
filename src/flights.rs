//! Scheduled flights from the AviationStack API

use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::error::Service;
use crate::http::{self, check_status, read_json};
use crate::models::FlightEntry;
use crate::{NavMindError, Result};

#[async_trait]
pub trait FlightSchedule: Send + Sync {
    /// Flights between two IATA codes. An empty list means no matches.
    async fn search(&self, departure: &str, arrival: &str) -> Result<Vec<FlightEntry>>;
}

pub struct AviationStackClient {
    client: Client,
    base_url: String,
    access_key: String,
    limit: u8,
}

impl AviationStackClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        access_key: impl Into<String>,
        limit: u8,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            access_key: access_key.into(),
            limit,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FlightsResponse {
    #[serde(default)]
    data: Option<Vec<Flight>>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Flight {
    airline: Option<Named>,
    flight: Option<FlightCode>,
    departure: Option<Schedule>,
    arrival: Option<Schedule>,
}

#[derive(Debug, Deserialize)]
struct Named {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlightCode {
    iata: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Schedule {
    scheduled: Option<String>,
}

/// Scheduled times are RFC 3339. A value without an offset is read as UTC.
fn parse_time(value: Option<String>) -> Option<DateTime<FixedOffset>> {
    let text = value?;
    if let Ok(time) = DateTime::parse_from_rfc3339(&text) {
        return Some(time);
    }
    match NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S") {
        Ok(naive) => Some(naive.and_utc().fixed_offset()),
        Err(err) => {
            debug!("Ignoring unparsable scheduled time '{}': {}", text, err);
            None
        }
    }
}

impl From<Flight> for FlightEntry {
    fn from(flight: Flight) -> Self {
        Self {
            airline: flight.airline.and_then(|a| a.name),
            flight_number: flight.flight.and_then(|f| f.iata),
            departure: parse_time(flight.departure.and_then(|d| d.scheduled)),
            arrival: parse_time(flight.arrival.and_then(|a| a.scheduled)),
        }
    }
}

fn into_entries(response: FlightsResponse, limit: usize) -> Result<Vec<FlightEntry>> {
    if let Some(error) = response.error {
        let message = match (error.code, error.message) {
            (Some(code), Some(message)) => format!("{code}: {message}"),
            (None, Some(message)) => message,
            (Some(code), None) => code,
            (None, None) => "unknown error".to_string(),
        };
        return Err(NavMindError::api(Service::Flights, message));
    }

    Ok(response
        .data
        .unwrap_or_default()
        .into_iter()
        .take(limit)
        .map(FlightEntry::from)
        .collect())
}

#[async_trait]
impl FlightSchedule for AviationStackClient {
    #[instrument(skip(self))]
    async fn search(&self, departure: &str, arrival: &str) -> Result<Vec<FlightEntry>> {
        info!("Searching flights {} -> {}", departure, arrival);
        let start_time = Instant::now();

        let limit = self.limit.to_string();
        let response = self
            .client
            .get(http::endpoint(&self.base_url, "v1/flights"))
            .query(&[
                ("access_key", self.access_key.as_str()),
                ("dep_iata", departure),
                ("arr_iata", arrival),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| NavMindError::transport(Service::Flights, &e))?;

        let response = check_status(Service::Flights, response).await?;
        let body: FlightsResponse = read_json(Service::Flights, response).await?;
        let flights = into_entries(body, self.limit.into())?;

        info!(
            "Found {} flights {} -> {} in {:.3}s",
            flights.len(),
            departure,
            arrival,
            start_time.elapsed().as_secs_f64()
        );
        Ok(flights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> FlightsResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_nested_fields_are_flattened() {
        let response = parse(json!({
            "pagination": {"limit": 3, "offset": 0, "count": 1, "total": 1},
            "data": [{
                "flight_date": "2025-06-01",
                "flight_status": "scheduled",
                "departure": {"airport": "Indira Gandhi International", "iata": "DEL", "scheduled": "2025-06-01T06:10:00+00:00"},
                "arrival": {"airport": "Dabolim", "iata": "GOI", "scheduled": "2025-06-01T08:45:00+00:00"},
                "airline": {"name": "IndiGo", "iata": "6E"},
                "flight": {"number": "2101", "iata": "6E2101"}
            }]
        }));

        let flights = into_entries(response, 3).unwrap();
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].airline.as_deref(), Some("IndiGo"));
        assert_eq!(flights[0].flight_number.as_deref(), Some("6E2101"));
        assert_eq!(
            flights[0].departure.unwrap().to_rfc3339(),
            "2025-06-01T06:10:00+00:00"
        );
        assert!(flights[0].arrival.is_some());
    }

    #[test]
    fn test_null_fields_stay_absent() {
        let response = parse(json!({
            "data": [{"airline": {"name": null}, "flight": null, "departure": {"scheduled": null}, "arrival": {}}]
        }));
        let flights = into_entries(response, 3).unwrap();
        assert_eq!(
            flights[0],
            FlightEntry {
                airline: None,
                flight_number: None,
                departure: None,
                arrival: None,
            }
        );
    }

    #[rstest]
    #[case(Some("2025-06-01T06:10:00+05:30"), Some("2025-06-01T06:10:00+05:30"))]
    #[case(Some("2025-06-01T06:10:00"), Some("2025-06-01T06:10:00+00:00"))]
    #[case(Some("06:10 tomorrow"), None)]
    #[case(None, None)]
    fn test_parse_time(#[case] input: Option<&str>, #[case] expected: Option<&str>) {
        let parsed = parse_time(input.map(str::to_string));
        assert_eq!(parsed.map(|t| t.to_rfc3339()).as_deref(), expected);
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let response = parse(json!({"pagination": {"count": 0}, "data": []}));
        assert!(into_entries(response, 3).unwrap().is_empty());
    }

    #[test]
    fn test_limit_is_enforced() {
        let flight = json!({"airline": {"name": "X"}});
        let response = parse(json!({"data": [flight.clone(), flight.clone(), flight.clone(), flight]}));
        assert_eq!(into_entries(response, 3).unwrap().len(), 3);
    }

    #[test]
    fn test_error_object_is_failure() {
        let response = parse(json!({
            "error": {"code": "invalid_access_key", "message": "You have not supplied a valid API Access Key."}
        }));
        let err = into_entries(response, 3).unwrap_err();
        assert!(err.to_string().contains("invalid_access_key"));
    }
}
