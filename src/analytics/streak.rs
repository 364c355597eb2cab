//! Streak calculation over a habit's completion days.

use std::collections::BTreeSet;

use super::day_key::DayKey;

/// Consecutive completed days walking backward from `today`. Zero when today
/// itself is not completed.
pub fn current_streak(completions: &BTreeSet<DayKey>, today: DayKey) -> u32 {
    let mut streak = 0;
    let mut cursor = today;
    while completions.contains(&cursor) {
        streak += 1;
        cursor = cursor.previous();
    }
    streak
}

/// Longest run of consecutive calendar days anywhere in the history.
///
/// Input order and duplicates do not matter. An empty history is 0 and any
/// single day is a run of 1, whether or not it touches today.
pub fn longest_streak<'a, I>(completions: I) -> u32
where
    I: IntoIterator<Item = &'a DayKey>,
{
    let days: BTreeSet<DayKey> = completions.into_iter().copied().collect();

    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<DayKey> = None;

    for day in days {
        run = match prev {
            Some(p) if p.next() == day => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }

    longest
}
