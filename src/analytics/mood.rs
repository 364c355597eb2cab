use serde::Serialize;

use crate::models::mood::{Mood, MoodEntry, MoodLog};

use super::day_key::{last_n_days, week_of, DayKey};
use super::heatmap::{mood_heatmap, MonthHeatmap, MoodDay};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodPoint {
    pub date: DayKey,
    pub day: &'static str,
    /// `None` for days without a mood, so charts leave a gap.
    pub score: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodSquare {
    pub date: DayKey,
    pub day: &'static str,
    pub mood: Option<Mood>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MoodCounts {
    pub happy: u32,
    pub good: u32,
    pub neutral: u32,
    pub low: u32,
    pub sad: u32,
}

impl MoodCounts {
    fn slot(&mut self, mood: Mood) -> &mut u32 {
        match mood {
            Mood::Happy => &mut self.happy,
            Mood::Good => &mut self.good,
            Mood::Neutral => &mut self.neutral,
            Mood::Low => &mut self.low,
            Mood::Sad => &mut self.sad,
        }
    }

    pub fn add(&mut self, mood: Mood) {
        *self.slot(mood) += 1;
    }

    pub fn get(&self, mood: Mood) -> u32 {
        match mood {
            Mood::Happy => self.happy,
            Mood::Good => self.good,
            Mood::Neutral => self.neutral,
            Mood::Low => self.low,
            Mood::Sad => self.sad,
        }
    }

    pub fn total(&self) -> u32 {
        Mood::ALL.iter().map(|m| self.get(*m)).sum()
    }

    /// One row per mood, happiest first, for summary legends.
    pub fn breakdown(&self) -> Vec<MoodCountRow> {
        Mood::ALL
            .into_iter()
            .map(|mood| MoodCountRow {
                mood,
                label: mood.label(),
                emoji: mood.emoji(),
                count: self.get(mood),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodCountRow {
    pub mood: Mood,
    pub label: &'static str,
    pub emoji: &'static str,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodReport {
    pub today: DayKey,
    pub today_entry: Option<MoodEntry>,
    pub last_seven: Vec<MoodPoint>,
    pub current_week: [MoodSquare; 7],
    pub month_counts: MoodCounts,
    pub month_breakdown: Vec<MoodCountRow>,
    pub heatmap: MonthHeatmap<MoodDay>,
}

pub fn mood_last_seven(moods: &MoodLog, today: DayKey) -> Vec<MoodPoint> {
    last_n_days(today, 7)
        .into_iter()
        .map(|date| MoodPoint {
            date,
            day: date.weekday_label(),
            score: moods.mood_on(date).map(Mood::score),
        })
        .collect()
}

/// Sunday through Saturday of the week holding `today`.
pub fn mood_current_week(moods: &MoodLog, today: DayKey) -> [MoodSquare; 7] {
    week_of(today).map(|date| MoodSquare {
        date,
        day: date.weekday_label(),
        mood: moods.mood_on(date),
    })
}

/// Logged moods per kind in the calendar month of `today`.
pub fn mood_month_counts(moods: &MoodLog, today: DayKey) -> MoodCounts {
    let mut counts = MoodCounts::default();
    for (date, entry) in moods.iter() {
        if !date.same_month(today) {
            continue;
        }
        if let Some(mood) = entry.mood {
            counts.add(mood);
        }
    }
    counts
}

pub fn mood_report(moods: &MoodLog, today: DayKey) -> MoodReport {
    let month_counts = mood_month_counts(moods, today);
    MoodReport {
        today,
        today_entry: moods.get(today).cloned(),
        last_seven: mood_last_seven(moods, today),
        current_week: mood_current_week(moods, today),
        month_counts,
        month_breakdown: month_counts.breakdown(),
        heatmap: mood_heatmap(moods, today),
    }
}
