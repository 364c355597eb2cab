use crate::models::habit::{Habit, HabitWithMeta};

use super::day_key::DayKey;
use super::streak::{current_streak, longest_streak};

pub fn annotate(habit: &Habit, today: DayKey) -> HabitWithMeta {
    HabitWithMeta {
        completed_today: habit.is_completed_on(today),
        current_streak: current_streak(&habit.completions, today),
        longest_streak: longest_streak(&habit.completions),
        habit: habit.clone(),
    }
}

/// Annotates every habit, keeping the caller's order.
pub fn annotate_all(habits: &[Habit], today: DayKey) -> Vec<HabitWithMeta> {
    habits.iter().map(|h| annotate(h, today)).collect()
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
    fn test_annotate_flags_today() {
        let today = day("2024-01-03");
        let habits = vec![
            habit("read", &["2024-01-02", "2024-01-03"]),
            habit("run", &["2024-01-01", "2024-01-02"]),
        ];
        let meta = annotate_all(&habits, today);

        assert_eq!(meta.len(), 2);
        assert_eq!(meta[0].habit.name, "read");
        assert!(meta[0].completed_today);
        assert_eq!(meta[0].current_streak, 2);
        assert_eq!(meta[0].longest_streak, 2);

        assert!(!meta[1].completed_today);
        assert_eq!(meta[1].current_streak, 0);
        assert_eq!(meta[1].longest_streak, 2);
    }

    #[test]
    fn test_annotate_empty_habit() {
        let meta = annotate(&habit("new", &[]), day("2024-01-03"));
        assert!(!meta.completed_today);
        assert_eq!(meta.current_streak, 0);
        assert_eq!(meta.longest_streak, 0);
    }
}
