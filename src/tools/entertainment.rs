//! Entertainment search tool

use serde::Deserialize;
use serde_json::{json, Value};

use super::catalog::TravelCatalog;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntertainmentSearchParams {
    pub date: String,
    pub time_from: String,
    pub time_to: String,
    pub category: Option<String>,
    pub max_distance: Option<f64>,
    pub budget: Option<f64>,
}

/// Search entertainment within a free-time window.
///
/// An option qualifies when it fits entirely inside the window
/// (`startTime >= timeFrom && endTime <= timeTo`; zero-padded 24h times
/// compare lexicographically). Category, distance, and per-person budget
/// filters are conjunctive. Candidate order is preserved.
pub async fn run(catalog: &dyn TravelCatalog, params: EntertainmentSearchParams) -> Value {
    let mut options = catalog.entertainment(&params.date).await;

    options.retain(|o| {
        o.start_time.as_str() >= params.time_from.as_str()
            && o.end_time.as_str() <= params.time_to.as_str()
    });

    if let Some(ref category) = params.category {
        options.retain(|o| &o.category == category);
    }
    if let Some(max_distance) = params.max_distance {
        options.retain(|o| o.distance_from_strip <= max_distance);
    }
    if let Some(budget) = params.budget {
        options.retain(|o| o.price <= budget);
    }

    json!({
        "entertainmentOptions": options,
        "totalResults": options.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::catalog::MockCatalog;

    fn params(from: &str, to: &str) -> EntertainmentSearchParams {
        EntertainmentSearchParams {
            date: "2025-06-16".into(),
            time_from: from.into(),
            time_to: to.into(),
            category: None,
            max_distance: None,
            budget: None,
        }
    }

    #[tokio::test]
    async fn test_time_window_requires_full_containment() {
        // Evening window: shows at 19:00/19:30 ending by 21:30 qualify;
        // Hell's Kitchen starts at 17:00 and Fremont ends at 02:00, so not.
        let result = run(&MockCatalog, params("18:30", "22:00")).await;
        let names: Vec<&str> = result["entertainmentOptions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Cirque du Soleil - O", "Blue Man Group"]);
        assert_eq!(result["totalResults"], 2);
    }

    #[tokio::test]
    async fn test_category_filter_is_exact() {
        let mut p = params("10:00", "23:59");
        p.category = Some("sightseeing".into());
        let result = run(&MockCatalog, p).await;
        let options = result["entertainmentOptions"].as_array().unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0]["name"], "High Roller Observation Wheel");
    }

    #[tokio::test]
    async fn test_budget_and_distance_filters() {
        let mut p = params("10:00", "23:59");
        p.budget = Some(100.0);
        p.max_distance = Some(1.0);
        let result = run(&MockCatalog, p).await;
        let options = result["entertainmentOptions"].as_array().unwrap();
        for o in options {
            assert!(o["price"].as_f64().unwrap() <= 100.0);
            assert!(o["distanceFromStrip"].as_f64().unwrap() <= 1.0);
        }
    }

    #[tokio::test]
    async fn test_date_echoed_on_results() {
        let result = run(&MockCatalog, params("10:00", "23:59")).await;
        let options = result["entertainmentOptions"].as_array().unwrap();
        assert!(!options.is_empty());
        assert!(options.iter().all(|o| o["date"] == "2025-06-16"));
    }
}
