//! Month-at-a-glance heatmaps.
//!
//! A month is laid out as week rows of seven cells, Sunday first. Cells before
//! the 1st and after the last day are `Empty` so every row is full width. What
//! a real day carries is up to the caller: habit completion counts or the
//! logged mood.

use serde::Serialize;

use crate::models::habit::Habit;
use crate::models::mood::{Mood, MoodLog};

use super::day_key::{DayKey, MonthSpan};

pub const LEVEL_THRESHOLDS: [(f64, u8); 3] = [(0.8, 4), (0.6, 3), (0.35, 2)];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HeatmapCell<T> {
    Empty,
    Day(DayCell<T>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell<T> {
    pub date: DayKey,
    /// Day of month, 1-based.
    pub day: u32,
    #[serde(flatten)]
    pub value: T,
}

pub type HeatmapGrid<T> = Vec<Vec<HeatmapCell<T>>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthHeatmap<T> {
    pub year: i32,
    pub month: u32,
    pub weeks: HeatmapGrid<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitDay {
    pub completed: u32,
    pub total_habits: u32,
    pub level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodDay {
    pub mood: Option<Mood>,
    /// 0 when nothing was logged.
    pub score: u8,
    pub notes_count: usize,
}

/// Padding and fill counts of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridStats {
    pub leading: usize,
    pub trailing: usize,
    pub filled: usize,
}

/// Lays out `span` as week rows, asking `cell_value` for each real day.
pub fn month_grid<T, F>(span: MonthSpan, mut cell_value: F) -> HeatmapGrid<T>
where
    F: FnMut(DayKey) -> T,
{
    let mut weeks = Vec::new();
    let mut week: Vec<HeatmapCell<T>> = Vec::with_capacity(7);

    for _ in 0..span.first_weekday {
        week.push(HeatmapCell::Empty);
    }

    for date in span.iter_days() {
        week.push(HeatmapCell::Day(DayCell {
            date,
            day: date.day(),
            value: cell_value(date),
        }));
        if week.len() == 7 {
            weeks.push(std::mem::replace(&mut week, Vec::with_capacity(7)));
        }
    }

    if !week.is_empty() {
        while week.len() < 7 {
            week.push(HeatmapCell::Empty);
        }
        weeks.push(week);
    }

    weeks
}

pub fn grid_stats<T>(grid: &HeatmapGrid<T>) -> GridStats {
    let empty: Vec<bool> = grid
        .iter()
        .flatten()
        .map(|c| matches!(c, HeatmapCell::Empty))
        .collect();
    GridStats {
        leading: empty.iter().take_while(|e| **e).count(),
        trailing: empty.iter().rev().take_while(|e| **e).count(),
        filled: empty.iter().filter(|e| !**e).count(),
    }
}

/// Bucket a completion ratio into 0..=4.
pub fn intensity_level(ratio: f64) -> u8 {
    for (threshold, level) in LEVEL_THRESHOLDS {
        if ratio >= threshold {
            return level;
        }
    }
    if ratio > 0.0 {
        1
    } else {
        0
    }
}

/// Completions per day across all habits for the month containing `today`.
///
/// The ratio for every day, past ones included, is taken against the number
/// of habits in `habits` right now.
pub fn habit_heatmap(habits: &[Habit], today: DayKey) -> MonthHeatmap<HabitDay> {
    let span = MonthSpan::containing(today);
    let total_habits = habits.len() as u32;

    let weeks = month_grid(span, |date| {
        let completed = habits.iter().filter(|h| h.is_completed_on(date)).count() as u32;
        let ratio = if total_habits > 0 {
            completed as f64 / total_habits as f64
        } else {
            0.0
        };
        HabitDay {
            completed,
            total_habits,
            level: intensity_level(ratio),
        }
    });

    MonthHeatmap {
        year: span.year(),
        month: span.month(),
        weeks,
    }
}

pub fn mood_heatmap(moods: &MoodLog, today: DayKey) -> MonthHeatmap<MoodDay> {
    let span = MonthSpan::containing(today);

    let weeks = month_grid(span, |date| {
        let entry = moods.get(date);
        let mood = entry.and_then(|e| e.mood);
        MoodDay {
            mood,
            score: mood.map(Mood::score).unwrap_or(0),
            notes_count: entry.map(|e| e.notes.len()).unwrap_or(0),
        }
    });

    MonthHeatmap {
        year: span.year(),
        month: span.month(),
        weeks,
    }
}
