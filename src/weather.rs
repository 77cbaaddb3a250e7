//! Daily forecasts from the Open-Meteo API

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument, warn};

use crate::error::Service;
use crate::http::{self, check_status, read_json};
use crate::models::{Coordinates, ForecastDay};
use crate::{NavMindError, Result};

/// Metrics requested from the `daily` endpoint, in response order
const DAILY_METRICS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum";

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Per-day forecast ordered by date
    async fn daily_forecast(&self, coordinates: Coordinates) -> Result<Vec<ForecastDay>>;
}

/// `OpenMeteo` forecast client (no API key required)
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
    forecast_days: u8,
}

impl OpenMeteoClient {
    pub fn new(client: Client, base_url: impl Into<String>, forecast_days: u8) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            forecast_days,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = coordinates.latitude, lon = coordinates.longitude))]
    async fn daily_forecast(&self, coordinates: Coordinates) -> Result<Vec<ForecastDay>> {
        info!(
            "Getting {}-day forecast for coordinates: {}",
            self.forecast_days,
            coordinates.format_coordinates()
        );
        let start_time = Instant::now();

        let response = self
            .client
            .get(http::endpoint(&self.base_url, "forecast"))
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("daily", DAILY_METRICS.to_string()),
                ("forecast_days", self.forecast_days.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| NavMindError::transport(Service::Weather, &e))?;

        let response = check_status(Service::Weather, response).await?;
        let forecast: openmeteo::ForecastResponse = read_json(Service::Weather, response).await?;
        let days = forecast.into_days()?;

        info!(
            "Successfully retrieved forecast with {} days in {:.3}s",
            days.len(),
            start_time.elapsed().as_secs_f64()
        );
        if days.is_empty() {
            warn!("Forecast response contained no days");
        }

        Ok(days)
    }
}

/// `OpenMeteo` API response structures and conversion utilities
mod openmeteo {
    use chrono::NaiveDate;
    use serde::Deserialize;

    use crate::error::Service;
    use crate::models::ForecastDay;
    use crate::{NavMindError, Result};

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub daily: Option<DailyData>,
    }

    /// Daily weather data from `OpenMeteo`: one array per metric, indexed by day
    #[derive(Debug, Deserialize)]
    pub struct DailyData {
        pub time: Vec<String>,
        #[serde(rename = "temperature_2m_max")]
        pub temperature_max: Vec<Option<f32>>,
        #[serde(rename = "temperature_2m_min")]
        pub temperature_min: Vec<Option<f32>>,
        #[serde(rename = "precipitation_sum")]
        pub precipitation: Vec<Option<f32>>,
    }

    impl ForecastResponse {
        /// Zip the parallel arrays into one record per day.
        ///
        /// Any inconsistency fails the whole forecast; a partial forecast is
        /// never returned.
        pub fn into_days(self) -> Result<Vec<ForecastDay>> {
            let daily = self.daily.ok_or_else(|| {
                NavMindError::api(Service::Weather, "response has no daily block")
            })?;

            let expected = daily.time.len();
            let lengths = [
                ("temperature_2m_max", daily.temperature_max.len()),
                ("temperature_2m_min", daily.temperature_min.len()),
                ("precipitation_sum", daily.precipitation.len()),
            ];
            for (metric, len) in lengths {
                if len != expected {
                    return Err(NavMindError::api(
                        Service::Weather,
                        format!("{metric} has {len} values for {expected} days"),
                    ));
                }
            }

            let mut days = daily
                .time
                .iter()
                .zip(daily.temperature_max)
                .zip(daily.temperature_min)
                .zip(daily.precipitation)
                .map(|(((time, temp_max), temp_min), precipitation)| {
                    let date = NaiveDate::parse_from_str(time, "%Y-%m-%d").map_err(|_| {
                        NavMindError::api(Service::Weather, format!("malformed date '{time}'"))
                    })?;
                    Ok(ForecastDay {
                        date,
                        temp_max,
                        temp_min,
                        precipitation,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            days.sort_by_key(|day| day.date);
            Ok(days)
        }
    }
}
