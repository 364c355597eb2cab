//! Composite views the dashboard and analytics pages render in one request.

use serde::Serialize;

use crate::models::habit::{Habit, HabitWithMeta};
use crate::models::record::RecordId;

use super::day_key::DayKey;
use super::heatmap::{habit_heatmap, HabitDay, MonthHeatmap};
use super::insights::{compute_insights, Insights};
use super::meta::annotate_all;
use super::weekly::{
    daily_completion_counts, rounded_percent, streak_history, weekly_performance, weekly_series,
    window_completion_rate, StreakHistoryPoint, WeeklyPerformance, WeeklyPoint,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakCardKind {
    Current,
    Best,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakCard {
    pub kind: StreakCardKind,
    pub value: u32,
    pub label: String,
    pub icon: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub habit_id: Option<RecordId>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub today: DayKey,
    pub habits: Vec<HabitWithMeta>,
    pub weekly: Vec<WeeklyPoint>,
    pub total_habits: usize,
    pub completed_today: usize,
    pub today_completion_rate: u32,
    pub streak_cards: [StreakCard; 2],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub today: DayKey,
    pub habits: Vec<HabitWithMeta>,
    pub total_habits: usize,
    pub completed_today: usize,
    pub today_completion_rate: u32,
    pub weekly_completion_rate: u32,
    pub longest_streak_overall: u32,
    pub weekly_performance: Vec<WeeklyPerformance>,
    pub streak_history: Vec<StreakHistoryPoint>,
    pub heatmap: MonthHeatmap<HabitDay>,
    pub insights: Insights,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitRef {
    pub id: RecordId,
    pub name: String,
}

impl From<&Habit> for HabitRef {
    fn from(habit: &Habit) -> Self {
        Self {
            id: habit.id.clone(),
            name: habit.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayDetail {
    pub date: DayKey,
    pub total: usize,
    pub completed: usize,
    pub missed: usize,
    pub rate: u32,
    pub completed_habits: Vec<HabitRef>,
    pub missed_habits: Vec<HabitRef>,
}

pub fn dashboard_summary(habits: &[Habit], today: DayKey) -> DashboardSummary {
    let annotated = annotate_all(habits, today);
    let completed_today = annotated.iter().filter(|h| h.completed_today).count();

    DashboardSummary {
        today,
        weekly: weekly_series(habits, today),
        total_habits: annotated.len(),
        completed_today,
        today_completion_rate: rounded_percent(completed_today, annotated.len()),
        streak_cards: streak_cards(&annotated),
        habits: annotated,
    }
}

/// The habit with the best current streak and the one with the best
/// longest streak. The earliest habit wins a tie.
pub fn streak_cards(annotated: &[HabitWithMeta]) -> [StreakCard; 2] {
    let Some(first) = annotated.first() else {
        return [
            StreakCard {
                kind: StreakCardKind::Current,
                value: 0,
                label: "No streaks yet".to_string(),
                icon: "🔥",
                habit_id: None,
            },
            StreakCard {
                kind: StreakCardKind::Best,
                value: 0,
                label: "Add a habit to get started".to_string(),
                icon: "🏆",
                habit_id: None,
            },
        ];
    };

    let top_current = annotated.iter().fold(first, |best, h| {
        if h.current_streak > best.current_streak {
            h
        } else {
            best
        }
    });
    let top_longest = annotated.iter().fold(first, |best, h| {
        if h.longest_streak > best.longest_streak {
            h
        } else {
            best
        }
    });

    [
        StreakCard {
            kind: StreakCardKind::Current,
            value: top_current.current_streak,
            label: format!("Current streak · {}", top_current.habit.name),
            icon: "🔥",
            habit_id: Some(top_current.habit.id.clone()),
        },
        StreakCard {
            kind: StreakCardKind::Best,
            value: top_longest.longest_streak,
            label: format!("Best streak · {}", top_longest.habit.name),
            icon: "🏆",
            habit_id: Some(top_longest.habit.id.clone()),
        },
    ]
}

pub fn analytics_report(habits: &[Habit], today: DayKey) -> AnalyticsReport {
    let annotated = annotate_all(habits, today);
    let total = annotated.len();
    let completed_today = annotated.iter().filter(|h| h.completed_today).count();
    let longest_streak_overall = annotated.iter().map(|h| h.longest_streak).max().unwrap_or(0);

    let week = daily_completion_counts(habits, today, 7);

    AnalyticsReport {
        today,
        total_habits: total,
        completed_today,
        today_completion_rate: rounded_percent(completed_today, total),
        weekly_completion_rate: window_completion_rate(&week, total),
        longest_streak_overall,
        weekly_performance: weekly_performance(habits, today),
        streak_history: streak_history(habits, today),
        heatmap: habit_heatmap(habits, today),
        insights: compute_insights(habits, today),
        habits: annotated,
    }
}

/// Which habits were and were not completed on `date`. `None` without habits.
pub fn day_detail(habits: &[Habit], date: DayKey) -> Option<DayDetail> {
    if habits.is_empty() {
        return None;
    }

    let (done, not_done): (Vec<&Habit>, Vec<&Habit>) =
        habits.iter().partition(|h| h.is_completed_on(date));

    let total = habits.len();
    let completed = done.len();

    Some(DayDetail {
        date,
        total,
        completed,
        missed: total - completed,
        rate: rounded_percent(completed, total),
        completed_habits: done.into_iter().map(HabitRef::from).collect(),
        missed_habits: not_done.into_iter().map(HabitRef::from).collect(),
    })
}
