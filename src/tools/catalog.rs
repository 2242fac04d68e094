//! Travel inventory source
//!
//! `TravelCatalog` is the seam between tool orchestration and whatever
//! supplies flight/hotel/entertainment candidates. The default
//! `MockCatalog` serves a fixed Las Vegas inventory; a live backend can be
//! dropped in without touching the tools.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One flight candidate, outbound or return.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOption {
    pub airline: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub origin: String,
    pub destination: String,
    pub price: f64,
    pub duration: String,
    pub stops: u32,
}

/// A hotel candidate before stay-length pricing is applied.
#[derive(Debug, Clone)]
pub struct HotelListing {
    pub name: String,
    pub address: String,
    pub distance_from_venue: f64,
    pub star_rating: u32,
    pub price_per_night: f64,
    pub amenities: Vec<String>,
    pub available_rooms: u32,
}

/// An entertainment candidate for a given date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntertainmentOption {
    pub name: String,
    pub venue: String,
    pub address: String,
    pub category: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub price: f64,
    pub description: String,
    pub distance_from_strip: f64,
}

/// Source of travel candidates.
#[async_trait]
pub trait TravelCatalog: Send + Sync {
    /// Outbound candidates into Las Vegas on the departure date.
    async fn outbound_flights(&self, origin: &str, departure_date: &str) -> Vec<FlightOption>;

    /// Return candidates out of Las Vegas on the return date.
    async fn return_flights(&self, origin: &str, return_date: &str) -> Vec<FlightOption>;

    /// Hotel inventory near the venue.
    async fn hotels(&self) -> Vec<HotelListing>;

    /// Entertainment listings for a date.
    async fn entertainment(&self, date: &str) -> Vec<EntertainmentOption>;
}

/// Fixed in-memory inventory.
pub struct MockCatalog;

#[async_trait]
impl TravelCatalog for MockCatalog {
    async fn outbound_flights(&self, origin: &str, departure_date: &str) -> Vec<FlightOption> {
        vec![
            FlightOption {
                airline: "Southwest Airlines".into(),
                departure_time: format!("{}T08:30:00", departure_date),
                arrival_time: format!("{}T10:15:00", departure_date),
                origin: origin.into(),
                destination: "LAS".into(),
                price: 289.99,
                duration: "1h 45m".into(),
                stops: 0,
            },
            FlightOption {
                airline: "Delta Airlines".into(),
                departure_time: format!("{}T10:45:00", departure_date),
                arrival_time: format!("{}T12:55:00", departure_date),
                origin: origin.into(),
                destination: "LAS".into(),
                price: 324.50,
                duration: "2h 10m".into(),
                stops: 0,
            },
            FlightOption {
                airline: "American Airlines".into(),
                departure_time: format!("{}T12:15:00", departure_date),
                arrival_time: format!("{}T15:05:00", departure_date),
                origin: origin.into(),
                destination: "LAS".into(),
                price: 256.75,
                duration: "2h 50m".into(),
                stops: 1,
            },
        ]
    }

    async fn return_flights(&self, origin: &str, return_date: &str) -> Vec<FlightOption> {
        vec![
            FlightOption {
                airline: "Southwest Airlines".into(),
                departure_time: format!("{}T14:30:00", return_date),
                arrival_time: format!("{}T16:15:00", return_date),
                origin: "LAS".into(),
                destination: origin.into(),
                price: 295.50,
                duration: "1h 45m".into(),
                stops: 0,
            },
            FlightOption {
                airline: "Delta Airlines".into(),
                departure_time: format!("{}T18:20:00", return_date),
                arrival_time: format!("{}T20:35:00", return_date),
                origin: "LAS".into(),
                destination: origin.into(),
                price: 310.25,
                duration: "2h 15m".into(),
                stops: 0,
            },
            FlightOption {
                airline: "American Airlines".into(),
                departure_time: format!("{}T09:45:00", return_date),
                arrival_time: format!("{}T12:40:00", return_date),
                origin: "LAS".into(),
                destination: origin.into(),
                price: 275.00,
                duration: "2h 55m".into(),
                stops: 1,
            },
        ]
    }

    async fn hotels(&self) -> Vec<HotelListing> {
        vec![
            HotelListing {
                name: "Bellagio Hotel & Casino".into(),
                address: "3600 S Las Vegas Blvd, Las Vegas, NV 89109".into(),
                distance_from_venue: 0.8,
                star_rating: 5,
                price_per_night: 299.99,
                amenities: vec![
                    "pool".into(),
                    "spa".into(),
                    "free-wifi".into(),
                    "restaurant".into(),
                    "fitness-center".into(),
                ],
                available_rooms: 3,
            },
            HotelListing {
                name: "MGM Grand Hotel & Casino".into(),
                address: "3799 S Las Vegas Blvd, Las Vegas, NV 89109".into(),
                distance_from_venue: 1.2,
                star_rating: 4,
                price_per_night: 189.99,
                amenities: vec![
                    "pool".into(),
                    "free-wifi".into(),
                    "restaurant".into(),
                    "fitness-center".into(),
                ],
                available_rooms: 5,
            },
            HotelListing {
                name: "The Venetian Resort".into(),
                address: "3355 S Las Vegas Blvd, Las Vegas, NV 89109".into(),
                distance_from_venue: 0.5,
                star_rating: 5,
                price_per_night: 259.99,
                amenities: vec![
                    "pool".into(),
                    "spa".into(),
                    "free-wifi".into(),
                    "restaurant".into(),
                    "fitness-center".into(),
                    "business-center".into(),
                ],
                available_rooms: 2,
            },
            HotelListing {
                name: "Flamingo Las Vegas Hotel & Casino".into(),
                address: "3555 S Las Vegas Blvd, Las Vegas, NV 89109".into(),
                distance_from_venue: 0.9,
                star_rating: 3,
                price_per_night: 119.99,
                amenities: vec!["pool".into(), "free-wifi".into(), "restaurant".into()],
                available_rooms: 8,
            },
        ]
    }

    async fn entertainment(&self, date: &str) -> Vec<EntertainmentOption> {
        vec![
            EntertainmentOption {
                name: "Cirque du Soleil - O".into(),
                venue: "Bellagio Hotel & Casino".into(),
                address: "3600 S Las Vegas Blvd, Las Vegas, NV 89109".into(),
                category: "shows".into(),
                date: date.into(),
                start_time: "19:30".into(),
                end_time: "21:30".into(),
                price: 159.99,
                description: "Aquatic masterpiece featuring world-class acrobats, synchronized swimmers, and divers.".into(),
                distance_from_strip: 0.0,
            },
            EntertainmentOption {
                name: "Blue Man Group".into(),
                venue: "Luxor Hotel & Casino".into(),
                address: "3900 S Las Vegas Blvd, Las Vegas, NV 89119".into(),
                category: "shows".into(),
                date: date.into(),
                start_time: "19:00".into(),
                end_time: "20:30".into(),
                price: 99.99,
                description: "Iconic performance combining comedy, music, and technology.".into(),
                distance_from_strip: 0.0,
            },
            EntertainmentOption {
                name: "Gordon Ramsay Hell's Kitchen".into(),
                venue: "Caesars Palace".into(),
                address: "3570 S Las Vegas Blvd, Las Vegas, NV 89109".into(),
                category: "dining".into(),
                date: date.into(),
                start_time: "17:00".into(),
                end_time: "22:00".into(),
                price: 75.00,
                description: "Upscale dining experience from celebrity chef Gordon Ramsay.".into(),
                distance_from_strip: 0.0,
            },
            EntertainmentOption {
                name: "High Roller Observation Wheel".into(),
                venue: "The LINQ Promenade".into(),
                address: "3545 S Las Vegas Blvd, Las Vegas, NV 89109".into(),
                category: "sightseeing".into(),
                date: date.into(),
                start_time: "11:30".into(),
                end_time: "23:00".into(),
                price: 35.00,
                description: "World's tallest observation wheel with stunning views of the Las Vegas Strip.".into(),
                distance_from_strip: 0.0,
            },
            EntertainmentOption {
                name: "Fremont Street Experience".into(),
                venue: "Downtown Las Vegas".into(),
                address: "Fremont St, Las Vegas, NV 89101".into(),
                category: "sightseeing".into(),
                date: date.into(),
                start_time: "18:00".into(),
                end_time: "02:00".into(),
                price: 0.00,
                description: "Iconic pedestrian mall with light shows, street performers, and entertainment.".into(),
                distance_from_strip: 3.5,
            },
        ]
    }
}
