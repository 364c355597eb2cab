//! Fixed-window series built from per-day completion counts.

use serde::Serialize;

use crate::models::habit::Habit;

use super::day_key::{last_n_days, DayKey};

const HISTORY_WEEKS: usize = 4;

/// Number of habits completed on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: DayKey,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyPoint {
    pub date: DayKey,
    pub day: &'static str,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyPerformance {
    pub date: DayKey,
    pub day: &'static str,
    pub completed: u32,
    pub missed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakHistoryPoint {
    pub label: String,
    pub completion_rate: u32,
}

/// One count per day for the `days`-long window ending at `today`, oldest
/// first. Completions outside the window are ignored.
pub fn daily_completion_counts(habits: &[Habit], today: DayKey, days: usize) -> Vec<DailyCount> {
    last_n_days(today, days)
        .into_iter()
        .map(|date| DailyCount {
            date,
            count: habits.iter().filter(|h| h.is_completed_on(date)).count() as u32,
        })
        .collect()
}

/// Today and the six days before it, oldest first.
pub fn weekly_series(habits: &[Habit], today: DayKey) -> Vec<WeeklyPoint> {
    daily_completion_counts(habits, today, 7)
        .into_iter()
        .map(|c| WeeklyPoint {
            date: c.date,
            day: c.date.weekday_label(),
            value: c.count,
        })
        .collect()
}

/// Like [`weekly_series`] but split into completed and missed habits.
pub fn weekly_performance(habits: &[Habit], today: DayKey) -> Vec<WeeklyPerformance> {
    let total = habits.len() as u32;
    daily_completion_counts(habits, today, 7)
        .into_iter()
        .map(|c| WeeklyPerformance {
            date: c.date,
            day: c.date.weekday_label(),
            completed: c.count,
            missed: total.saturating_sub(c.count),
        })
        .collect()
}

/// Completion rate of each of the last four 7-day blocks, oldest first.
pub fn streak_history(habits: &[Habit], today: DayKey) -> Vec<StreakHistoryPoint> {
    let counts = daily_completion_counts(habits, today, HISTORY_WEEKS * 7);
    counts
        .chunks(7)
        .enumerate()
        .map(|(i, week)| StreakHistoryPoint {
            label: format!("Week {}", i + 1),
            completion_rate: window_completion_rate(week, habits.len()),
        })
        .collect()
}

/// Rounded percentage of possible completions achieved across `counts`.
pub fn window_completion_rate(counts: &[DailyCount], total_habits: usize) -> u32 {
    let completed: u32 = counts.iter().map(|c| c.count).sum();
    rounded_percent(completed as usize, total_habits * counts.len())
}

pub(crate) fn rounded_percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::day_key::day;

    fn habit(name: &str, days: &[&str]) -> Habit {
        Habit {
            id: name.into(),
            name: name.to_string(),
            completions: days.iter().map(|d| day(d)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_weekly_series_shape() {
        // 2024-01-03 is a Wednesday
        let series = weekly_series(&[], day("2024-01-03"));
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, day("2023-12-28"));
        assert_eq!(series[0].day, "Thu");
        assert_eq!(series[6].date, day("2024-01-03"));
        assert_eq!(series[6].day, "Wed");
        assert!(series.iter().all(|p| p.value == 0));
    }

    #[test]
    fn test_weekly_series_today_slot() {
        let today = day("2024-01-03");
        let habits = vec![
            habit("read", &["2024-01-03", "2024-01-01"]),
            habit("run", &["2024-01-01", "2023-12-01", "2024-01-04"]),
        ];
        let series = weekly_series(&habits, today);
        assert_eq!(series[6].value, 1);
        assert_eq!(series[4].value, 2);
        let total: u32 = series.iter().map(|p| p.value).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_weekly_performance_missed() {
        let today = day("2024-01-03");
        let habits = vec![habit("read", &["2024-01-03"]), habit("run", &[])];
        let perf = weekly_performance(&habits, today);
        assert_eq!(perf[6].completed, 1);
        assert_eq!(perf[6].missed, 1);
        assert!(perf.iter().all(|p| p.completed + p.missed == 2));
    }

    #[test]
    fn test_streak_history_four_weeks() {
        let today = day("2024-01-28");
        let empty = streak_history(&[], today);
        assert_eq!(empty.len(), 4);
        assert_eq!(empty[0].label, "Week 1");
        assert!(empty.iter().all(|w| w.completion_rate == 0));

        // Every day of the most recent week done for one of two habits
        let recent: Vec<String> = (0..7).map(|i| today.offset(-i).to_string()).collect();
        let recent: Vec<&str> = recent.iter().map(String::as_str).collect();
        let habits = vec![habit("read", &recent), habit("run", &[])];
        let history = streak_history(&habits, today);
        assert_eq!(history[3].label, "Week 4");
        assert_eq!(history[3].completion_rate, 50);
        assert_eq!(history[0].completion_rate, 0);
    }

    #[test]
    fn test_rounded_percent() {
        assert_eq!(rounded_percent(0, 0), 0);
        assert_eq!(rounded_percent(1, 3), 33);
        assert_eq!(rounded_percent(2, 3), 67);
        assert_eq!(rounded_percent(7, 7), 100);
    }
}
