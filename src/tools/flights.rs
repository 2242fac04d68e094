//! Flight search tool

use serde::Deserialize;
use serde_json::{json, Value};

use super::catalog::TravelCatalog;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchParams {
    pub origin_city: String,
    pub origin_airport: Option<String>,
    pub destination_city: String,
    pub departure_date: String,
    pub return_date: String,
    pub budget: Option<f64>,
}

/// Search flights into Las Vegas for the course dates.
///
/// With a budget, each leg is filtered to half the total so the round trip
/// fits inside it. Candidate order is preserved.
pub async fn run(catalog: &dyn TravelCatalog, params: FlightSearchParams) -> Value {
    if params.destination_city.to_lowercase() != "las vegas" {
        return json!({
            "error": "Destination must be Las Vegas for CME course travel planning"
        });
    }

    let origin = params
        .origin_airport
        .clone()
        .unwrap_or_else(|| format!("{} Airport", params.origin_city));

    let mut outbound = catalog
        .outbound_flights(&origin, &params.departure_date)
        .await;
    let mut returning = catalog.return_flights(&origin, &params.return_date).await;

    if let Some(budget) = params.budget {
        let per_leg = budget / 2.0;
        outbound.retain(|f| f.price <= per_leg);
        returning.retain(|f| f.price <= per_leg);
    }

    json!({
        "outboundFlights": outbound,
        "returnFlights": returning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::catalog::MockCatalog;

    fn params(destination: &str, budget: Option<f64>) -> FlightSearchParams {
        FlightSearchParams {
            origin_city: "Boston".into(),
            origin_airport: None,
            destination_city: destination.into(),
            departure_date: "2025-06-15".into(),
            return_date: "2025-06-18".into(),
            budget,
        }
    }

    #[tokio::test]
    async fn test_rejects_non_vegas_destination() {
        let result = run(&MockCatalog, params("Reno", None)).await;
        assert_eq!(
            result,
            json!({"error": "Destination must be Las Vegas for CME course travel planning"})
        );
    }

    #[tokio::test]
    async fn test_destination_check_is_case_insensitive() {
        let result = run(&MockCatalog, params("LAS VEGAS", None)).await;
        assert!(result.get("error").is_none());
        assert_eq!(result["outboundFlights"].as_array().unwrap().len(), 3);
        assert_eq!(result["returnFlights"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_budget_filters_each_leg_to_half() {
        // 600 total => 300 per leg. Outbound keeps 289.99 and 256.75;
        // return keeps 295.50 and 275.00.
        let result = run(&MockCatalog, params("Las Vegas", Some(600.0))).await;
        let outbound = result["outboundFlights"].as_array().unwrap();
        let returning = result["returnFlights"].as_array().unwrap();
        assert_eq!(outbound.len(), 2);
        assert_eq!(returning.len(), 2);
        assert!(outbound.iter().all(|f| f["price"].as_f64().unwrap() <= 300.0));
    }

    #[tokio::test]
    async fn test_candidate_order_preserved() {
        let result = run(&MockCatalog, params("Las Vegas", None)).await;
        let airlines: Vec<&str> = result["outboundFlights"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["airline"].as_str().unwrap())
            .collect();
        assert_eq!(
            airlines,
            vec!["Southwest Airlines", "Delta Airlines", "American Airlines"]
        );
    }

    #[tokio::test]
    async fn test_dates_flow_into_times() {
        let result = run(&MockCatalog, params("Las Vegas", None)).await;
        let first = &result["outboundFlights"][0];
        assert_eq!(first["departureTime"], "2025-06-15T08:30:00");
        assert_eq!(result["returnFlights"][0]["departureTime"], "2025-06-18T14:30:00");
    }
}
