//! Hotel search tool

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::catalog::TravelCatalog;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSearchParams {
    #[allow(dead_code)]
    pub venue_address: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub star_rating: Option<u32>,
    pub max_distance: Option<f64>,
    pub budget: Option<f64>,
    pub amenities: Option<Vec<String>>,
}

/// A hotel candidate priced for the requested stay.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelOption {
    pub name: String,
    pub address: String,
    pub distance_from_venue: f64,
    pub star_rating: u32,
    pub price_per_night: f64,
    pub total_price: f64,
    pub nights: u32,
    pub amenities: Vec<String>,
    pub available_rooms: u32,
}

/// Number of nights for a stay. Same-day or inverted ranges count as one
/// night so total pricing never hits zero.
pub fn calculate_nights(check_in: &str, check_out: &str) -> Option<u32> {
    let check_in = NaiveDate::parse_from_str(check_in, "%Y-%m-%d").ok()?;
    let check_out = NaiveDate::parse_from_str(check_out, "%Y-%m-%d").ok()?;
    let nights = (check_out - check_in).num_days();
    Some(if nights > 0 { nights as u32 } else { 1 })
}

/// Search hotels near the venue with conjunctive filters.
///
/// All supplied filters must hold: star rating at least, distance at most,
/// nightly price at most, and every requested amenity present. Results are
/// sorted by distance from the venue, closest first.
pub async fn run(catalog: &dyn TravelCatalog, params: HotelSearchParams) -> Value {
    let nights = match calculate_nights(&params.check_in_date, &params.check_out_date) {
        Some(n) => n,
        None => {
            return json!({
                "error": "Check-in and check-out dates must be in YYYY-MM-DD format"
            });
        }
    };

    let mut hotels: Vec<HotelOption> = catalog
        .hotels()
        .await
        .into_iter()
        .map(|h| HotelOption {
            total_price: h.price_per_night * nights as f64,
            nights,
            name: h.name,
            address: h.address,
            distance_from_venue: h.distance_from_venue,
            star_rating: h.star_rating,
            price_per_night: h.price_per_night,
            amenities: h.amenities,
            available_rooms: h.available_rooms,
        })
        .collect();

    if let Some(min_stars) = params.star_rating {
        hotels.retain(|h| h.star_rating >= min_stars);
    }
    if let Some(max_distance) = params.max_distance {
        hotels.retain(|h| h.distance_from_venue <= max_distance);
    }
    if let Some(budget) = params.budget {
        hotels.retain(|h| h.price_per_night <= budget);
    }
    if let Some(ref amenities) = params.amenities {
        if !amenities.is_empty() {
            hotels.retain(|h| amenities.iter().all(|a| h.amenities.contains(a)));
        }
    }

    hotels.sort_by(|a, b| {
        a.distance_from_venue
            .partial_cmp(&b.distance_from_venue)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    json!({
        "hotels": hotels,
        "totalResults": hotels.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::catalog::MockCatalog;

    fn params() -> HotelSearchParams {
        HotelSearchParams {
            venue_address: "3570 S Las Vegas Blvd".into(),
            check_in_date: "2025-06-15".into(),
            check_out_date: "2025-06-17".into(),
            star_rating: None,
            max_distance: None,
            budget: None,
            amenities: None,
        }
    }

    #[test]
    fn test_calculate_nights() {
        assert_eq!(calculate_nights("2023-06-15", "2023-06-17"), Some(2));
        assert_eq!(calculate_nights("2023-06-15", "2023-06-15"), Some(1));
        assert_eq!(calculate_nights("2023-06-17", "2023-06-15"), Some(1));
        assert_eq!(calculate_nights("June 15", "2023-06-17"), None);
    }

    #[tokio::test]
    async fn test_sorted_by_distance_ascending() {
        let result = run(&MockCatalog, params()).await;
        let hotels = result["hotels"].as_array().unwrap();
        assert_eq!(hotels.len(), 4);
        let distances: Vec<f64> = hotels
            .iter()
            .map(|h| h["distanceFromVenue"].as_f64().unwrap())
            .collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_max_distance_bounds_every_result() {
        let mut p = params();
        p.max_distance = Some(0.9);
        let result = run(&MockCatalog, p).await;
        let hotels = result["hotels"].as_array().unwrap();
        assert_eq!(result["totalResults"], 3);
        assert!(hotels
            .iter()
            .all(|h| h["distanceFromVenue"].as_f64().unwrap() <= 0.9));
    }

    #[tokio::test]
    async fn test_filters_are_conjunctive() {
        let mut p = params();
        p.star_rating = Some(5);
        p.budget = Some(280.0);
        p.amenities = Some(vec!["business-center".into()]);
        let result = run(&MockCatalog, p).await;
        let hotels = result["hotels"].as_array().unwrap();
        // Only the Venetian is 5-star, under 280/night, with a business center.
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0]["name"], "The Venetian Resort");
    }

    #[tokio::test]
    async fn test_total_price_spans_the_stay() {
        let result = run(&MockCatalog, params()).await;
        let hotels = result["hotels"].as_array().unwrap();
        for h in hotels {
            let per_night = h["pricePerNight"].as_f64().unwrap();
            let total = h["totalPrice"].as_f64().unwrap();
            assert_eq!(h["nights"], 2);
            assert!((total - per_night * 2.0).abs() < 1e-9);
        }
    }

    #[tokio::test]
    async fn test_bad_dates_yield_error_object() {
        let mut p = params();
        p.check_in_date = "next tuesday".into();
        let result = run(&MockCatalog, p).await;
        assert!(result.get("error").is_some());
    }
}
