//! Daily forecast model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One forecast day. Metrics the service reported as null stay `None`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    /// Maximum temperature in Celsius
    pub temp_max: Option<f32>,
    /// Minimum temperature in Celsius
    pub temp_min: Option<f32>,
    /// Precipitation sum in mm
    pub precipitation: Option<f32>,
}
