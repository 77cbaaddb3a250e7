//! Mock hotel recommendations standing in for a real inventory lookup

use crate::models::HotelEntry;

const TEMPLATES: [(&str, u32, f32); 3] = [
    ("Grand Hotel", 5000, 4.5),
    ("Budget Stay", 2500, 4.0),
    ("Luxury Suites", 12000, 5.0),
];

#[must_use]
pub fn recommend_hotels(city: &str) -> Vec<HotelEntry> {
    TEMPLATES
        .iter()
        .map(|(suffix, price, rating)| HotelEntry {
            name: format!("{city} {suffix}"),
            price: *price,
            rating: *rating,
        })
        .collect()
}
