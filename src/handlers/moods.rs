use axum::{
    extract::{Query, State},
    Json,
};

use crate::analytics::mood::{mood_report, MoodReport};
use crate::error::AppResult;
use crate::models::record::UserRecord;
use crate::AppState;

use super::analytics::{check_record, AnalyticsQuery};

pub async fn report(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
    Json(record): Json<UserRecord>,
) -> AppResult<Json<MoodReport>> {
    check_record(&state, &record)?;
    let today = query.reference_day()?;
    tracing::debug!(entries = record.moods.len(), %today, "Building mood report");
    Ok(Json(mood_report(&record.moods, today)))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::{app, AppState};

    async fn post_moods(uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app(AppState::new(Config::default()))
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_mood_report() {
        let (status, json) = post_moods(
            "/api/analytics/moods?today=2024-05-08",
            json!({
                "moods": {
                    "2024-05-08": { "mood": "happy", "notes": [{ "id": 1, "text": "sunny" }] },
                    "2024-05-06": { "mood": "low" },
                    "2024-04-30": { "mood": "sad" },
                    "not-a-day": { "mood": "good" }
                }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["todayEntry"]["mood"], "happy");
        assert_eq!(json["todayEntry"]["notes"][0]["text"], "sunny");
        assert_eq!(json["lastSeven"][6]["score"], 5);
        assert!(json["lastSeven"][5]["score"].is_null());
        assert_eq!(json["currentWeek"][0]["day"], "Sun");
        assert_eq!(json["currentWeek"][1]["mood"], "low");
        assert_eq!(json["monthCounts"]["happy"], 1);
        assert_eq!(json["monthCounts"]["sad"], 0);
        assert_eq!(json["heatmap"]["month"], 5);
    }

    #[tokio::test]
    async fn test_empty_record() {
        let (status, json) = post_moods("/api/analytics/moods?today=2024-05-08", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["todayEntry"].is_null());
        assert_eq!(json["currentWeek"].as_array().unwrap().len(), 7);
    }
}
