//! Travel plan generation tool
//!
//! Renders the selected options into an itinerary prompt, makes one
//! non-streaming model call, and returns the generated plan together with a
//! cost summary.

use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::chat::provider::{ChatRequest, Message, MessageRole, Provider};

const PLAN_SYSTEM_PROMPT: &str =
    "You are an AI travel planner for medical professionals attending CME courses in Las Vegas.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanCourseData {
    pub title: String,
    pub venue: String,
    pub venue_address: String,
    #[allow(dead_code)]
    pub start_date: String,
    #[allow(dead_code)]
    pub end_date: String,
    pub formatted_start_date: String,
    pub formatted_end_date: String,
    pub formatted_start_time: String,
    pub formatted_end_time: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanFlight {
    pub airline: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub origin: String,
    pub destination: String,
    pub price: f64,
    #[allow(dead_code)]
    pub duration: Option<String>,
    #[allow(dead_code)]
    pub stops: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanHotel {
    pub name: String,
    pub address: String,
    pub distance_from_venue: f64,
    #[allow(dead_code)]
    pub star_rating: Option<u32>,
    pub price_per_night: f64,
    pub total_price: f64,
    pub nights: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntertainment {
    pub name: String,
    pub venue: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub price: f64,
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPlanParams {
    pub course_data: PlanCourseData,
    pub selected_flights: Vec<PlanFlight>,
    pub selected_hotel: PlanHotel,
    pub selected_entertainment: Vec<PlanEntertainment>,
    pub budget: Option<String>,
}

fn render_prompt(params: &TravelPlanParams) -> String {
    let flight_details = params
        .selected_flights
        .iter()
        .map(|f| {
            format!(
                "- {} from {} to {}\n  - Departure: {}\n  - Arrival: {}\n  - Price: ${}",
                f.airline, f.origin, f.destination, f.departure_time, f.arrival_time, f.price
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let h = &params.selected_hotel;
    let hotel_details = format!(
        "- Name: {}\n- Address: {}\n- Distance from venue: {} miles\n- Price per night: ${}\n- Total price ({} nights): ${}",
        h.name, h.address, h.distance_from_venue, h.price_per_night, h.nights, h.total_price
    );

    let entertainment_details = params
        .selected_entertainment
        .iter()
        .map(|e| {
            format!(
                "- {} at {}\n  - Date: {}\n  - Time: {} - {}\n  - Price: ${}\n  - Description: {}",
                e.name, e.venue, e.date, e.start_time, e.end_time, e.price, e.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let c = &params.course_data;
    format!(
        "Course Information:\n\
         - Title: {}\n\
         - Venue: {}\n\
         - Address: {}\n\
         - Start Date: {}\n\
         - End Date: {}\n\
         - Start Time: {}\n\
         - End Time: {}\n\n\
         Selected Flight Information:\n{}\n\n\
         Selected Hotel Information:\n{}\n\n\
         Selected Entertainment Options:\n{}\n\n\
         Total Budget: {}\n\n\
         Please create a comprehensive travel itinerary for the user, including:\n\
         1. A day-by-day schedule\n\
         2. Transportation details\n\
         3. Important notes and reminders\n\
         4. A total cost breakdown\n\n\
         Make sure the schedule accommodates the course timing as the primary priority.\n\
         Format this as a professionally structured travel plan.",
        c.title,
        c.venue,
        c.venue_address,
        c.formatted_start_date,
        c.formatted_end_date,
        c.formatted_start_time,
        c.formatted_end_time,
        flight_details,
        hotel_details,
        entertainment_details,
        params.budget.as_deref().unwrap_or("Not specified"),
    )
}

/// Cost summary for the selected options.
fn summarize(params: &TravelPlanParams) -> Value {
    let flights_cost: f64 = params.selected_flights.iter().map(|f| f.price).sum();
    let hotel_cost = params.selected_hotel.total_price;
    let entertainment_cost: f64 = params.selected_entertainment.iter().map(|e| e.price).sum();
    let total_cost = flights_cost + hotel_cost + entertainment_cost;

    json!({
        "courseTitle": params.course_data.title,
        "travelDates": format!(
            "{} to {}",
            params.course_data.formatted_start_date, params.course_data.formatted_end_date
        ),
        "totalCost": total_cost,
        "flightsCost": flights_cost,
        "hotelCost": hotel_cost,
        "entertainmentCost": entertainment_cost,
    })
}

/// Generate a complete travel plan from the selected options.
///
/// A model failure surfaces as tool error data; the chat turn carries on.
pub async fn run(provider: &Arc<dyn Provider>, model: &str, params: TravelPlanParams) -> Value {
    let prompt = render_prompt(&params);

    let request = ChatRequest::new(model, PLAN_SYSTEM_PROMPT).with_messages(vec![Message {
        role: MessageRole::User,
        content: prompt,
    }]);

    match provider.create(request).await {
        Ok(response) => json!({
            "travelPlan": response.text,
            "summary": summarize(&params),
        }),
        Err(e) => {
            tracing::error!("Travel plan generation failed: {}", e);
            json!({ "error": "Failed to generate travel plan" })
        }
    }
}
