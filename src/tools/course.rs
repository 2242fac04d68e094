//! Course lookup tool

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::store::CourseStore;

fn format_date(ts: DateTime<Utc>) -> String {
    // en-US long form, e.g. "Sunday, June 15, 2025"
    ts.format("%A, %B %-d, %Y").to_string()
}

fn format_time(ts: DateTime<Utc>) -> String {
    ts.format("%I:%M %p").to_string()
}

/// Fetch the user's most recently booked course.
///
/// Takes no arguments; the user identity comes from the request context.
/// Storage failures are reported as tool error data, never propagated.
pub async fn run(courses: &CourseStore, user_id: &str) -> Value {
    let course = match courses.latest_for_user(user_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return json!({ "error": "No course found for this user" });
        }
        Err(e) => {
            tracing::error!(user_id, "Course lookup failed: {}", e);
            return json!({ "error": "Failed to retrieve course data" });
        }
    };

    let start = DateTime::<Utc>::from_timestamp(course.start_date, 0).unwrap_or_default();
    let end = DateTime::<Utc>::from_timestamp(course.end_date, 0).unwrap_or_default();
    let duration_secs = (course.end_date - course.start_date).max(0);
    let duration_days = (duration_secs as f64 / 86_400.0).ceil() as i64;

    json!({
        "courseId": course.id,
        "title": course.title,
        "venue": course.venue,
        "venueAddress": course.venue_address,
        "startDate": start.to_rfc3339(),
        "endDate": end.to_rfc3339(),
        "formattedStartDate": format_date(start),
        "formattedEndDate": format_date(end),
        "formattedStartTime": format_time(start),
        "formattedEndTime": format_time(end),
        "durationDays": duration_days,
    })
}
