use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::record::{lenient, lenient_timestamp, RecordId};
use crate::analytics::day_key::DayKey;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    /// Days the habit was marked done. A set, so a day is either in or out.
    #[serde(default, deserialize_with = "lenient_day_set")]
    pub completions: BTreeSet<DayKey>,
    #[serde(default, deserialize_with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Habit {
    pub fn is_completed_on(&self, day: DayKey) -> bool {
        self.completions.contains(&day)
    }
}

/// A habit plus the streak figures derived for a given day. Never stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitWithMeta {
    #[serde(flatten)]
    pub habit: Habit,
    pub completed_today: bool,
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Parses each entry as a day key and drops whatever does not parse, so one
/// bad value never hides the rest of the history. A value that is not a list
/// at all reads as no completions.
fn lenient_day_set<'de, D>(deserializer: D) -> Result<BTreeSet<DayKey>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Null => Vec::new(),
        other => {
            tracing::debug!(raw = %other, "Ignoring completions that are not a list");
            Vec::new()
        }
    };
    let mut days = BTreeSet::new();
    for value in raw {
        match value.as_str().map(str::parse::<DayKey>) {
            Some(Ok(day)) => {
                days.insert(day);
            }
            _ => tracing::debug!(raw = %value, "Dropping malformed completion day"),
        }
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::day_key::day;

    #[test]
    fn test_completions_dedup_and_drop_garbage() {
        let habit: Habit = serde_json::from_str(
            r#"{"id": "h1", "name": "Run",
                "completions": ["2024-01-02", "2024-01-01", "2024-01-02", "oops", 17, null]}"#,
        )
        .unwrap();
        let days: Vec<_> = habit.completions.iter().map(ToString::to_string).collect();
        assert_eq!(days, vec!["2024-01-01", "2024-01-02"]);
        assert!(habit.is_completed_on(day("2024-01-01")));
        assert!(!habit.is_completed_on(day("2024-01-03")));
    }

    #[test]
    fn test_wrong_shapes_degrade_to_empty() {
        for completions in [r#""2024-01-01""#, "{}", "42", "true"] {
            let json = format!(r#"{{"id": "h1", "name": "Run", "completions": {completions}}}"#);
            let habit: Habit = serde_json::from_str(&json).unwrap();
            assert!(habit.completions.is_empty(), "completions: {completions}");
            assert_eq!(habit.name, "Run");
        }

        let habit: Habit =
            serde_json::from_str(r#"{"id": true, "name": 7, "description": ["x"]}"#).unwrap();
        assert_eq!(habit.id, RecordId::default());
        assert_eq!(habit.name, "");
        assert_eq!(habit.description, "");
    }

    #[test]
    fn test_missing_fields_default() {
        let habit: Habit = serde_json::from_str(r#"{"name": "Stretch", "description": null}"#).unwrap();
        assert!(habit.completions.is_empty());
        assert_eq!(habit.description, "");
        assert_eq!(habit.id, RecordId::default());
    }

    #[test]
    fn test_meta_serializes_flat_camel_case() {
        let habit: Habit = serde_json::from_str(r#"{"id": "h1", "name": "Run"}"#).unwrap();
        let meta = HabitWithMeta {
            habit,
            completed_today: true,
            current_streak: 2,
            longest_streak: 4,
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["id"], "h1");
        assert_eq!(json["completedToday"], true);
        assert_eq!(json["currentStreak"], 2);
        assert_eq!(json["longestStreak"], 4);
    }
}
