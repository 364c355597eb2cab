use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use validator::{ValidationError, ValidationErrors};

use crate::analytics::day_key::DayKey;
use crate::analytics::heatmap::{habit_heatmap, HabitDay, MonthHeatmap};
use crate::analytics::insights::{compute_insights, Insights};
use crate::analytics::meta::annotate_all;
use crate::analytics::summary::{
    analytics_report, dashboard_summary, day_detail, AnalyticsReport, DashboardSummary, DayDetail,
};
use crate::analytics::weekly::{weekly_series, WeeklyPoint};
use crate::error::{AppError, AppResult};
use crate::models::habit::HabitWithMeta;
use crate::models::record::UserRecord;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    /// Pins the reference day, `YYYY-MM-DD`. Defaults to the server's local date.
    pub today: Option<String>,
}

impl AnalyticsQuery {
    pub fn reference_day(&self) -> AppResult<DayKey> {
        match self.today.as_deref() {
            Some(raw) => parse_day(raw),
            None => Ok(DayKey::today()),
        }
    }
}

pub(crate) fn parse_day(raw: &str) -> AppResult<DayKey> {
    raw.parse()
        .map_err(|e| AppError::Validation(format!("{e}")))
}

/// Enforces the configured habit cap.
pub(crate) fn check_record(state: &AppState, record: &UserRecord) -> AppResult<()> {
    let max = state.config.max_habits;
    if validator::validate_length(&record.habits, None, Some(max as u64), None) {
        return Ok(());
    }

    let mut error = ValidationError::new("length");
    error.add_param("max".into(), &max);
    error.message = Some(
        format!("Record has {} habits, the limit is {}", record.habits.len(), max).into(),
    );
    let mut errors = ValidationErrors::new();
    errors.add("habits", error);
    Err(errors.into())
}

pub async fn habits_with_meta(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
    Json(record): Json<UserRecord>,
) -> AppResult<Json<Vec<HabitWithMeta>>> {
    check_record(&state, &record)?;
    let today = query.reference_day()?;
    tracing::debug!(habits = record.habits.len(), %today, "Annotating habits");
    Ok(Json(annotate_all(&record.habits, today)))
}

pub async fn weekly(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
    Json(record): Json<UserRecord>,
) -> AppResult<Json<Vec<WeeklyPoint>>> {
    check_record(&state, &record)?;
    let today = query.reference_day()?;
    Ok(Json(weekly_series(&record.habits, today)))
}

pub async fn heatmap(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
    Json(record): Json<UserRecord>,
) -> AppResult<Json<MonthHeatmap<HabitDay>>> {
    check_record(&state, &record)?;
    let today = query.reference_day()?;
    Ok(Json(habit_heatmap(&record.habits, today)))
}

pub async fn insights(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
    Json(record): Json<UserRecord>,
) -> AppResult<Json<Insights>> {
    check_record(&state, &record)?;
    let today = query.reference_day()?;
    let insights = compute_insights(&record.habits, today);
    tracing::debug!(
        habits = record.habits.len(),
        %today,
        trend = ?insights.trend,
        active_days = ?insights.active_days,
        "Computed insights"
    );
    Ok(Json(insights))
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
    Json(record): Json<UserRecord>,
) -> AppResult<Json<DashboardSummary>> {
    check_record(&state, &record)?;
    let today = query.reference_day()?;
    Ok(Json(dashboard_summary(&record.habits, today)))
}

pub async fn report(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
    Json(record): Json<UserRecord>,
) -> AppResult<Json<AnalyticsReport>> {
    check_record(&state, &record)?;
    let today = query.reference_day()?;
    tracing::debug!(habits = record.habits.len(), %today, "Building analytics report");
    Ok(Json(analytics_report(&record.habits, today)))
}

pub async fn day(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(record): Json<UserRecord>,
) -> AppResult<Json<DayDetail>> {
    check_record(&state, &record)?;
    let date = parse_day(&date)?;
    day_detail(&record.habits, date)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No habits to report on".into()))
}
