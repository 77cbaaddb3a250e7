//! Travel preferences submitted from the dashboard

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::{NavMindError, Result};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelType {
    #[default]
    #[serde(alias = "leisure")]
    Leisure,
    #[serde(alias = "business")]
    Business,
}

/// Accepted for completeness; city suggestions do not depend on it
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Season {
    #[default]
    #[serde(alias = "summer")]
    Summer,
    #[serde(alias = "winter")]
    Winter,
    #[serde(alias = "monsoon")]
    Monsoon,
}

impl fmt::Display for TravelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelType::Leisure => f.write_str("Leisure"),
            TravelType::Business => f.write_str("Business"),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Summer => f.write_str("Summer"),
            Season::Winter => f.write_str("Winter"),
            Season::Monsoon => f.write_str("Monsoon"),
        }
    }
}

/// One render cycle's worth of user input
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PreferenceSet {
    #[serde(default)]
    pub travel_type: TravelType,
    pub interest: String,
    #[serde(default)]
    pub season: Season,
    /// Total budget in the configured currency
    pub budget: f64,
    pub days: NonZeroU32,
    /// IATA code of the departure airport
    pub departure_code: String,
}

impl PreferenceSet {
    /// Check the set and return it with the departure code upper-cased
    pub fn validated(self) -> Result<Self> {
        if !self.budget.is_finite() || self.budget <= 0.0 {
            return Err(NavMindError::validation(format!(
                "Budget must be a positive amount, got {}",
                self.budget
            )));
        }

        let code = self.departure_code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(NavMindError::validation(format!(
                "Departure airport code must be 3 letters (IATA), got '{code}'"
            )));
        }

        let departure_code = code.to_ascii_uppercase();
        let interest = self.interest.trim().to_string();
        Ok(Self {
            departure_code,
            interest,
            ..self
        })
    }
}
