//! Plain-language insights over the last 30 days of completions.
//!
//! Every metric is derived independently from the same per-day count array,
//! so none of them depends on another's result.

use serde::Serialize;

use crate::models::habit::Habit;
use crate::models::record::RecordId;

use super::day_key::DayKey;
use super::streak::current_streak;
use super::weekly::{daily_completion_counts, DailyCount};

const LOOKBACK_DAYS: usize = 30;
const TREND_THRESHOLD_POINTS: f64 = 3.0;
const WEEKEND_THRESHOLD_POINTS: f64 = 5.0;

pub const NO_HABITS_MESSAGE: &str = "Create a habit to start seeing insights.";
const NO_STREAK_MESSAGE: &str = "You don't have an active streak yet. Try completing a habit today.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateTrend {
    Improved,
    Declined,
    Steady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekendLean {
    Weekend,
    Weekday,
    Balanced,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestStreak {
    pub habit_id: RecordId,
    pub habit_name: String,
    pub days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub streak_summary: String,
    pub weekend_pattern: Option<String>,
    pub improvement: Option<String>,
    pub consistency: Option<String>,

    pub trend: Option<RateTrend>,
    /// Last-7-day rate minus the previous 7 days, in percentage points.
    pub change_points: Option<f64>,
    pub weekend_lean: Option<WeekendLean>,
    pub weekend_rate: Option<f64>,
    pub weekday_rate: Option<f64>,
    pub active_days: Option<usize>,
    pub best_streak: Option<BestStreak>,
}

impl Insights {
    fn no_habits() -> Self {
        Self {
            streak_summary: NO_HABITS_MESSAGE.to_string(),
            weekend_pattern: None,
            improvement: None,
            consistency: None,
            trend: None,
            change_points: None,
            weekend_lean: None,
            weekend_rate: None,
            weekday_rate: None,
            active_days: None,
            best_streak: None,
        }
    }
}

pub fn compute_insights(habits: &[Habit], today: DayKey) -> Insights {
    if habits.is_empty() {
        return Insights::no_habits();
    }

    let total = habits.len();
    let last30 = daily_completion_counts(habits, today, LOOKBACK_DAYS);

    let (trend, change, improvement) = match week_over_week(&last30, total) {
        Some((trend, change)) => (Some(trend), Some(change), Some(describe_trend(trend, change))),
        None => (None, None, None),
    };

    let (lean, weekend_rate, weekday_rate, weekend_pattern) = match weekend_split(&last30, total) {
        Some((lean, weekend, weekday)) => (
            Some(lean),
            Some(weekend),
            Some(weekday),
            Some(describe_weekend(lean, weekend, weekday)),
        ),
        None => (None, None, None, None),
    };

    let active_days = last30.iter().filter(|d| d.count > 0).count();
    let consistency = format!(
        "You completed at least one habit on {} of the last {} days.",
        active_days, LOOKBACK_DAYS
    );

    let best_streak = best_current_streak(habits, today);
    let streak_summary = match &best_streak {
        Some(best) => format!(
            "Your best current streak is {} day{} on \"{}\".",
            best.days,
            if best.days == 1 { "" } else { "s" },
            best.habit_name
        ),
        None => NO_STREAK_MESSAGE.to_string(),
    };

    Insights {
        streak_summary,
        weekend_pattern,
        improvement,
        consistency: Some(consistency),
        trend,
        change_points: change,
        weekend_lean: lean,
        weekend_rate,
        weekday_rate,
        active_days: Some(active_days),
        best_streak,
    }
}

fn rate(completed: u32, possible: usize) -> Option<f64> {
    (possible > 0).then(|| completed as f64 / possible as f64 * 100.0)
}

/// Compares the last 7 days with the 7 before them.
fn week_over_week(last30: &[DailyCount], total: usize) -> Option<(RateTrend, f64)> {
    let last14 = &last30[last30.len().saturating_sub(14)..];
    let (prev7, last7) = last14.split_at(last14.len().saturating_sub(7));

    let sum = |days: &[DailyCount]| days.iter().map(|d| d.count).sum::<u32>();
    let last_rate = rate(sum(last7), total * last7.len())?;
    let prev_rate = rate(sum(prev7), total * prev7.len())?;
    let change = last_rate - prev_rate;

    let trend = if change > TREND_THRESHOLD_POINTS {
        RateTrend::Improved
    } else if change < -TREND_THRESHOLD_POINTS {
        RateTrend::Declined
    } else {
        RateTrend::Steady
    };
    Some((trend, change))
}

fn describe_trend(trend: RateTrend, change: f64) -> String {
    match trend {
        RateTrend::Improved => format!(
            "Your completion rate improved by {:.1} percentage points in the last week.",
            change
        ),
        RateTrend::Declined => format!(
            "Your completion rate dropped by {:.1} percentage points in the last week.",
            change.abs()
        ),
        RateTrend::Steady => {
            "Your weekly completion rate is steady compared to the previous week.".to_string()
        }
    }
}

/// Saturday/Sunday rate against Monday-Friday rate.
fn weekend_split(last30: &[DailyCount], total: usize) -> Option<(WeekendLean, f64, f64)> {
    let (weekend, weekday): (Vec<&DailyCount>, Vec<&DailyCount>) =
        last30.iter().partition(|d| d.date.is_weekend());

    let weekend_rate = rate(weekend.iter().map(|d| d.count).sum(), total * weekend.len())?;
    let weekday_rate = rate(weekday.iter().map(|d| d.count).sum(), total * weekday.len())?;

    let lean = if weekend_rate >= weekday_rate + WEEKEND_THRESHOLD_POINTS {
        WeekendLean::Weekend
    } else if weekend_rate + WEEKEND_THRESHOLD_POINTS <= weekday_rate {
        WeekendLean::Weekday
    } else {
        WeekendLean::Balanced
    };
    Some((lean, weekend_rate, weekday_rate))
}

fn describe_weekend(lean: WeekendLean, weekend: f64, weekday: f64) -> String {
    match lean {
        WeekendLean::Weekend => format!(
            "You complete more habits on weekends ({:.0}%) than weekdays ({:.0}%).",
            weekend, weekday
        ),
        WeekendLean::Weekday => format!(
            "You are more consistent on weekdays ({:.0}%) than weekends ({:.0}%).",
            weekday, weekend
        ),
        WeekendLean::Balanced => {
            "Your weekend and weekday consistency are about the same.".to_string()
        }
    }
}

/// Habit with the largest non-zero current streak; the first one wins ties.
fn best_current_streak(habits: &[Habit], today: DayKey) -> Option<BestStreak> {
    let mut best: Option<BestStreak> = None;
    for habit in habits {
        let days = current_streak(&habit.completions, today);
        if days > best.as_ref().map_or(0, |b| b.days) {
            best = Some(BestStreak {
                habit_id: habit.id.clone(),
                habit_name: habit.name.clone(),
                days,
            });
        }
    }
    best
}
