// tests/tools_test.rs


use std::sync::Arc;

use serde_json::{json, Value};

use concierge::store::CourseStore;
use concierge::tools::{MockCatalog, ToolExecutor};
use test_helpers::StubProvider;

async fn executor(provider: Arc<StubProvider>, pool: sqlx::SqlitePool) -> ToolExecutor {
    ToolExecutor::new(provider, Arc::new(MockCatalog), CourseStore::new(pool))
        .for_user("test-user-123")
        .with_plan_model("stub-plan")
}

fn parse(output: String) -> Value {
    serde_json::from_str(&output).expect("Tool output was not JSON")
}

#[tokio::test]
async fn test_unknown_tool_is_error_data() {
    let pool = test_helpers::test_pool().await;
    let exec = executor(Arc::new(StubProvider::new()), pool).await;

    let result = parse(exec.execute("bookSpaceFlight", "{}").await);
    assert_eq!(result["error"], "Unknown tool: bookSpaceFlight");
}

#[tokio::test]
async fn test_malformed_arguments_are_error_data() {
    let pool = test_helpers::test_pool().await;
    let exec = executor(Arc::new(StubProvider::new()), pool).await;

    let result = parse(exec.execute("searchFlights", "not json {").await);
    assert_eq!(result["error"], "Invalid arguments for searchFlights");

    // Valid JSON missing required fields is also a tool-level error.
    let result = parse(exec.execute("searchHotels", "{}").await);
    assert_eq!(result["error"], "Invalid arguments for searchHotels");
}

#[tokio::test]
async fn test_course_lookup_without_booking() {
    let pool = test_helpers::test_pool().await;
    let exec = executor(Arc::new(StubProvider::new()), pool).await;

    let result = parse(exec.execute("getCourseData", "").await);
    assert_eq!(result["error"], "No course found for this user");
}

#[tokio::test]
async fn test_course_lookup_formats_dates() {
    let pool = test_helpers::test_pool().await;
    let courses = CourseStore::new(pool.clone());

    // 2025-06-16 08:00 UTC through 2025-06-18 17:00 UTC
    courses
        .insert(
            "c1",
            "test-user-123",
            "Advanced Cardiac Imaging",
            "Caesars Forum",
            "3911 Koval Ln, Las Vegas, NV 89109",
            1750060800,
            1750266000,
        )
        .await
        .expect("insert failed");

    let exec = executor(Arc::new(StubProvider::new()), pool).await;
    let result = parse(exec.execute("getCourseData", "{}").await);

    assert_eq!(result["title"], "Advanced Cardiac Imaging");
    assert_eq!(result["formattedStartDate"], "Monday, June 16, 2025");
    assert_eq!(result["formattedStartTime"], "08:00 AM");
    assert_eq!(result["formattedEndTime"], "05:00 PM");
    assert_eq!(result["durationDays"], 3);
}

fn plan_args() -> String {
    json!({
        "courseData": {
            "title": "Advanced Cardiac Imaging",
            "venue": "Caesars Forum",
            "venueAddress": "3911 Koval Ln, Las Vegas, NV 89109",
            "startDate": "2025-06-16T08:00:00+00:00",
            "endDate": "2025-06-18T17:00:00+00:00",
            "formattedStartDate": "Monday, June 16, 2025",
            "formattedEndDate": "Wednesday, June 18, 2025",
            "formattedStartTime": "08:00 AM",
            "formattedEndTime": "05:00 PM"
        },
        "selectedFlights": [
            {
                "airline": "Southwest Airlines",
                "departureTime": "2025-06-15T08:30:00",
                "arrivalTime": "2025-06-15T10:15:00",
                "origin": "BOS",
                "destination": "LAS",
                "price": 289.99
            },
            {
                "airline": "Southwest Airlines",
                "departureTime": "2025-06-19T14:30:00",
                "arrivalTime": "2025-06-19T16:15:00",
                "origin": "LAS",
                "destination": "BOS",
                "price": 295.50
            }
        ],
        "selectedHotel": {
            "name": "The Venetian Resort",
            "address": "3355 S Las Vegas Blvd, Las Vegas, NV 89109",
            "distanceFromVenue": 0.5,
            "pricePerNight": 259.99,
            "totalPrice": 1039.96,
            "nights": 4
        },
        "selectedEntertainment": [
            {
                "name": "Blue Man Group",
                "venue": "Luxor Hotel & Casino",
                "date": "2025-06-17",
                "startTime": "19:00",
                "endTime": "20:30",
                "price": 99.99,
                "description": "Iconic performance combining comedy, music, and technology."
            }
        ],
        "budget": "2000"
    })
    .to_string()
}

#[tokio::test]
async fn test_generate_travel_plan_success() {
    let pool = test_helpers::test_pool().await;
    let provider =
        Arc::new(StubProvider::new().with_create_text("Day 1: arrive and check in early."));
    let exec = executor(provider, pool).await;

    let result = parse(exec.execute("generateTravelPlan", &plan_args()).await);

    assert_eq!(result["travelPlan"], "Day 1: arrive and check in early.");
    let summary = &result["summary"];
    assert_eq!(summary["courseTitle"], "Advanced Cardiac Imaging");
    let expected_total = 289.99 + 295.50 + 1039.96 + 99.99;
    assert!((summary["totalCost"].as_f64().unwrap() - expected_total).abs() < 1e-9);
}

#[tokio::test]
async fn test_generate_travel_plan_failure_is_error_data() {
    let pool = test_helpers::test_pool().await;
    let provider = Arc::new(StubProvider::new().failing_create());
    let exec = executor(provider, pool).await;

    let result = parse(exec.execute("generateTravelPlan", &plan_args()).await);
    assert_eq!(result["error"], "Failed to generate travel plan");
}

#[tokio::test]
async fn test_search_tools_through_executor() {
    let pool = test_helpers::test_pool().await;
    let exec = executor(Arc::new(StubProvider::new()), pool).await;

    let flights = parse(
        exec.execute(
            "searchFlights",
            &json!({
                "originCity": "Boston",
                "destinationCity": "Las Vegas",
                "departureDate": "2025-06-15",
                "returnDate": "2025-06-18"
            })
            .to_string(),
        )
        .await,
    );
    assert_eq!(flights["outboundFlights"].as_array().unwrap().len(), 3);

    let hotels = parse(
        exec.execute(
            "searchHotels",
            &json!({
                "venueAddress": "3911 Koval Ln",
                "checkInDate": "2025-06-15",
                "checkOutDate": "2025-06-18",
                "maxDistance": 0.9
            })
            .to_string(),
        )
        .await,
    );
    assert_eq!(hotels["totalResults"], 3);
    let distances: Vec<f64> = hotels["hotels"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["distanceFromVenue"].as_f64().unwrap())
        .collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));

    let entertainment = parse(
        exec.execute(
            "searchEntertainment",
            &json!({
                "date": "2025-06-16",
                "timeFrom": "18:30",
                "timeTo": "22:00"
            })
            .to_string(),
        )
        .await,
    );
    assert_eq!(entertainment["totalResults"], 2);
}
