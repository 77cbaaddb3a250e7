//! Static city catalog keyed by interest

use crate::models::{CitySuggestions, Season};

const BEACH: &[&str] = &["Goa", "Maldives", "Bali"];
const HISTORY: &[&str] = &["Rome", "Athens", "Varanasi"];
const FOOD: &[&str] = &["Bangkok", "Istanbul", "Mexico City"];
const FALLBACK: &[&str] = &["London", "Paris", "Tokyo"];

/// Main airport per catalog city
const AIRPORTS: &[(&str, &str)] = &[
    ("goa", "GOI"),
    ("maldives", "MLE"),
    ("bali", "DPS"),
    ("rome", "FCO"),
    ("athens", "ATH"),
    ("varanasi", "VNS"),
    ("bangkok", "BKK"),
    ("istanbul", "IST"),
    ("mexico city", "MEX"),
    ("london", "LHR"),
    ("paris", "CDG"),
    ("tokyo", "HND"),
];

fn lookup(interest: &str) -> Option<&'static [&'static str]> {
    match interest.trim().to_lowercase().as_str() {
        "beach" => Some(BEACH),
        "history" => Some(HISTORY),
        "food" => Some(FOOD),
        _ => None,
    }
}

/// Candidate cities for an interest, case-insensitive. Unknown interests get
/// the fallback list. The season does not influence the result.
#[must_use]
pub fn suggest_cities(interest: &str, _season: Season) -> &'static [&'static str] {
    lookup(interest).unwrap_or(FALLBACK)
}

#[must_use]
pub fn suggestions(interest: &str, season: Season) -> CitySuggestions {
    CitySuggestions {
        interest: interest.trim().to_string(),
        cities: suggest_cities(interest, season)
            .iter()
            .map(ToString::to_string)
            .collect(),
        fallback: lookup(interest).is_none(),
    }
}

/// IATA code used as the flight destination for a city.
///
/// Cities outside the catalog fall back to their first three letters, which
/// only sometimes names a real airport.
#[must_use]
pub fn arrival_code(city: &str) -> String {
    let key = city.trim().to_lowercase();
    AIRPORTS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, code)| (*code).to_string())
        .unwrap_or_else(|| {
            city.chars()
                .filter(|c| !c.is_whitespace())
                .take(3)
                .collect::<String>()
                .to_uppercase()
        })
}
