//! Travel tools: definitions and execution
//!
//! `get_tools()` declares the JSON-schema contracts exposed to the model;
//! `ToolExecutor` validates arguments into typed structs and dispatches.
//! Every failure inside a tool is returned as `{"error": ...}` data so a
//! bad call can never abort the chat turn.

pub mod catalog;
mod course;
mod entertainment;
mod flights;
mod hotels;
mod plan;

pub use catalog::{MockCatalog, TravelCatalog};
pub use hotels::calculate_nights;

use serde_json::{json, Value};
use std::sync::Arc;

use crate::chat::provider::{Provider, ToolDefinition};
use crate::store::CourseStore;

/// All tool definitions exposed to the model.
pub fn get_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "searchFlights".into(),
            description: "Search for flights from origin to destination on specific dates".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "originCity": {
                        "type": "string",
                        "description": "Departure city name"
                    },
                    "originAirport": {
                        "type": "string",
                        "description": "Preferred departure airport code (optional)"
                    },
                    "destinationCity": {
                        "type": "string",
                        "description": "Should be Las Vegas"
                    },
                    "departureDate": {
                        "type": "string",
                        "description": "Departure date in YYYY-MM-DD format"
                    },
                    "returnDate": {
                        "type": "string",
                        "description": "Return date in YYYY-MM-DD format"
                    },
                    "budget": {
                        "type": "number",
                        "description": "Maximum budget for flights in USD (optional)"
                    }
                },
                "required": ["originCity", "destinationCity", "departureDate", "returnDate"]
            }),
        },
        ToolDefinition {
            name: "searchHotels".into(),
            description: "Search for hotels near a specific location in Las Vegas".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "venueAddress": {
                        "type": "string",
                        "description": "The address of the CME course venue"
                    },
                    "checkInDate": {
                        "type": "string",
                        "description": "Check-in date in YYYY-MM-DD format"
                    },
                    "checkOutDate": {
                        "type": "string",
                        "description": "Check-out date in YYYY-MM-DD format"
                    },
                    "starRating": {
                        "type": "number",
                        "description": "Preferred hotel star rating (1-5)"
                    },
                    "maxDistance": {
                        "type": "number",
                        "description": "Maximum distance from venue in miles"
                    },
                    "budget": {
                        "type": "number",
                        "description": "Maximum budget per night in USD"
                    },
                    "amenities": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Desired amenities (e.g., [\"pool\", \"free-wifi\"])"
                    }
                },
                "required": ["venueAddress", "checkInDate", "checkOutDate"]
            }),
        },
        ToolDefinition {
            name: "searchEntertainment".into(),
            description: "Search for entertainment options in Las Vegas".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "date": {
                        "type": "string",
                        "description": "Date in YYYY-MM-DD format"
                    },
                    "timeFrom": {
                        "type": "string",
                        "description": "Start time in HH:MM format (24h)"
                    },
                    "timeTo": {
                        "type": "string",
                        "description": "End time in HH:MM format (24h)"
                    },
                    "category": {
                        "type": "string",
                        "description": "Entertainment category (shows, dining, sightseeing, etc.)"
                    },
                    "maxDistance": {
                        "type": "number",
                        "description": "Maximum distance from venue or hotel in miles"
                    },
                    "budget": {
                        "type": "number",
                        "description": "Maximum budget per person in USD"
                    }
                },
                "required": ["date", "timeFrom", "timeTo"]
            }),
        },
        ToolDefinition {
            name: "getCourseData".into(),
            description: "Get the user's latest booked CME course details".into(),
            parameters: json!({
                "type": "object",
                "properties": {}
            }),
        },
        ToolDefinition {
            name: "generateTravelPlan".into(),
            description:
                "Generate a complete travel plan based on selected flight, hotel, and entertainment options"
                    .into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "courseData": {
                        "type": "object",
                        "description": "Course details as returned by getCourseData"
                    },
                    "selectedFlights": {
                        "type": "array",
                        "items": { "type": "object" },
                        "description": "Chosen outbound and return flights"
                    },
                    "selectedHotel": {
                        "type": "object",
                        "description": "Chosen hotel with stay pricing"
                    },
                    "selectedEntertainment": {
                        "type": "array",
                        "items": { "type": "object" },
                        "description": "Chosen entertainment options"
                    },
                    "budget": {
                        "type": "string",
                        "description": "Total budget in USD (optional)"
                    }
                },
                "required": ["courseData", "selectedFlights", "selectedHotel", "selectedEntertainment"]
            }),
        },
    ]
}

/// Short human-readable description of a tool call, for logs and stream events.
pub fn tool_summary(name: &str, args: &Value) -> String {
    match name {
        "searchFlights" => {
            let origin = args["originCity"].as_str().unwrap_or("?");
            format!("Searching flights from {} to Las Vegas", origin)
        }
        "searchHotels" => {
            let check_in = args["checkInDate"].as_str().unwrap_or("?");
            format!("Searching hotels near the venue from {}", check_in)
        }
        "searchEntertainment" => {
            let date = args["date"].as_str().unwrap_or("?");
            format!("Searching entertainment for {}", date)
        }
        "getCourseData" => "Looking up booked course details".to_string(),
        "generateTravelPlan" => "Generating the travel plan".to_string(),
        _ => format!("Calling {}", name),
    }
}

/// Executes tool calls against the catalog, course store, and plan model.
pub struct ToolExecutor {
    provider: Arc<dyn Provider>,
    catalog: Arc<dyn TravelCatalog>,
    courses: CourseStore,
    user_id: String,
    plan_model: String,
}

impl ToolExecutor {
    pub fn new(
        provider: Arc<dyn Provider>,
        catalog: Arc<dyn TravelCatalog>,
        courses: CourseStore,
    ) -> Self {
        Self {
            provider,
            catalog,
            courses,
            user_id: String::new(),
            plan_model: "gpt-3.5-turbo".into(),
        }
    }

    /// Bind the executor to the authenticated user for this request.
    pub fn for_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_plan_model(mut self, model: impl Into<String>) -> Self {
        self.plan_model = model.into();
        self
    }

    /// Execute a tool call and return its output as a JSON string.
    ///
    /// Unknown tools and malformed arguments come back as error data, same
    /// as any failure inside the tool itself.
    pub async fn execute(&self, name: &str, arguments: &str) -> String {
        let raw = if arguments.trim().is_empty() {
            "{}"
        } else {
            arguments
        };

        let args: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(tool = name, "Malformed tool arguments: {}", e);
                return json!({ "error": format!("Invalid arguments for {}", name) }).to_string();
            }
        };

        tracing::debug!(tool = name, summary = %tool_summary(name, &args), "Executing tool");

        let result = self.dispatch(name, args).await;

        if let Some(err) = result.get("error").and_then(|e| e.as_str()) {
            tracing::debug!(tool = name, error = err, "Tool returned error data");
        }

        result.to_string()
    }

    async fn dispatch(&self, name: &str, args: Value) -> Value {
        match name {
            "searchFlights" => match serde_json::from_value(args) {
                Ok(params) => flights::run(self.catalog.as_ref(), params).await,
                Err(_) => json!({ "error": "Invalid arguments for searchFlights" }),
            },
            "searchHotels" => match serde_json::from_value(args) {
                Ok(params) => hotels::run(self.catalog.as_ref(), params).await,
                Err(_) => json!({ "error": "Invalid arguments for searchHotels" }),
            },
            "searchEntertainment" => match serde_json::from_value(args) {
                Ok(params) => entertainment::run(self.catalog.as_ref(), params).await,
                Err(_) => json!({ "error": "Invalid arguments for searchEntertainment" }),
            },
            "getCourseData" => course::run(&self.courses, &self.user_id).await,
            "generateTravelPlan" => match serde_json::from_value(args) {
                Ok(params) => plan::run(&self.provider, &self.plan_model, params).await,
                Err(_) => json!({ "error": "Invalid arguments for generateTravelPlan" }),
            },
            _ => json!({ "error": format!("Unknown tool: {}", name) }),
        }
    }
}
