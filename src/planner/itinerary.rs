//! Fixed three-day itinerary template

use crate::models::ItineraryEntry;

/// Three entries, days 1 to 3; only the first mentions the city
#[must_use]
pub fn build_itinerary(city: &str) -> Vec<ItineraryEntry> {
    [
        format!("Explore main landmarks in {city}"),
        "Visit local markets and cultural sites".to_string(),
        "Relax or take a nearby day trip".to_string(),
    ]
    .into_iter()
    .zip(1..)
    .map(|(plan, day)| ItineraryEntry { day, plan })
    .collect()
}
