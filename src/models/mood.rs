use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::record::{lenient, lenient_seq, lenient_timestamp, value_or_default, RecordId};
use crate::analytics::day_key::DayKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Good,
    Neutral,
    Low,
    Sad,
}

impl Mood {
    pub const ALL: [Mood; 5] = [Mood::Happy, Mood::Good, Mood::Neutral, Mood::Low, Mood::Sad];

    /// Heatmap intensity, 5 for happy down to 1 for sad.
    pub fn score(self) -> u8 {
        match self {
            Self::Happy => 5,
            Self::Good => 4,
            Self::Neutral => 3,
            Self::Low => 2,
            Self::Sad => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Good => "good",
            Self::Neutral => "neutral",
            Self::Low => "low",
            Self::Sad => "sad",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Good => "Good",
            Self::Neutral => "Neutral",
            Self::Low => "Low",
            Self::Sad => "Sad",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Happy => "😀",
            Self::Good => "🙂",
            Self::Neutral => "😐",
            Self::Low => "☹️",
            Self::Sad => "😢",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodNote {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoodEntry {
    #[serde(default, deserialize_with = "lenient_mood")]
    pub mood: Option<Mood>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub notes: Vec<MoodNote>,
}

/// Mood entries keyed by day. One entry per day; a later entry for the same
/// day replaces the earlier one.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct MoodLog(BTreeMap<DayKey, MoodEntry>);

impl MoodLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins.
    pub fn upsert(&mut self, day: DayKey, entry: MoodEntry) {
        self.0.insert(day, entry);
    }

    pub fn get(&self, day: DayKey) -> Option<&MoodEntry> {
        self.0.get(&day)
    }

    pub fn mood_on(&self, day: DayKey) -> Option<Mood> {
        self.get(day).and_then(|e| e.mood)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DayKey, &MoodEntry)> {
        self.0.iter().map(|(d, e)| (*d, e))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for MoodLog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MoodLogVisitor;

        impl<'de> Visitor<'de> for MoodLogVisitor {
            type Value = MoodLog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of day keys to mood entries")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<MoodLog, E> {
                Ok(MoodLog::new())
            }

            // Anything that is not a map carries no entries.
            fn visit_bool<E: serde::de::Error>(self, _: bool) -> Result<MoodLog, E> {
                Ok(ignored("bool"))
            }

            fn visit_i64<E: serde::de::Error>(self, _: i64) -> Result<MoodLog, E> {
                Ok(ignored("number"))
            }

            fn visit_u64<E: serde::de::Error>(self, _: u64) -> Result<MoodLog, E> {
                Ok(ignored("number"))
            }

            fn visit_f64<E: serde::de::Error>(self, _: f64) -> Result<MoodLog, E> {
                Ok(ignored("number"))
            }

            fn visit_str<E: serde::de::Error>(self, _: &str) -> Result<MoodLog, E> {
                Ok(ignored("string"))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<MoodLog, A::Error> {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(ignored("list"))
            }

            // Entries are applied in document order so a duplicate day keeps
            // the value written last.
            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<MoodLog, A::Error> {
                let mut log = MoodLog::new();
                while let Some((key, entry)) = map.next_entry::<String, serde_json::Value>()? {
                    match key.parse::<DayKey>() {
                        Ok(day) => log.upsert(day, value_or_default(entry)),
                        Err(_) => tracing::debug!(key = %key, "Dropping mood entry with malformed day"),
                    }
                }
                Ok(log)
            }
        }

        fn ignored(kind: &str) -> MoodLog {
            tracing::debug!(kind, "Expected a map of mood entries, ignoring value");
            MoodLog::new()
        }

        deserializer.deserialize_any(MoodLogVisitor)
    }
}

/// Unknown mood labels read as "no mood logged".
fn lenient_mood<'de, D>(deserializer: D) -> Result<Option<Mood>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(Mood::from_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::day_key::day;

    #[test]
    fn test_scores_are_ordered() {
        let scores: Vec<u8> = Mood::ALL.iter().map(|m| m.score()).collect();
        assert_eq!(scores, vec![5, 4, 3, 2, 1]);
        assert_eq!(Mood::from_str("neutral"), Some(Mood::Neutral));
        assert_eq!(Mood::from_str("ecstatic"), None);
    }

    #[test]
    fn test_log_last_write_wins() {
        let log: MoodLog = serde_json::from_str(
            r#"{
                "2024-01-02": {"mood": "sad"},
                "2024-01-02T09:00:00Z": {"mood": "happy"},
                "garbage": {"mood": "good"}
            }"#,
        )
        .unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.mood_on(day("2024-01-02")), Some(Mood::Happy));
    }

    #[test]
    fn test_entry_defaults() {
        let log: MoodLog = serde_json::from_str(
            r#"{"2024-01-02": {"mood": null}, "2024-01-03": null, "2024-01-04": {"mood": "meh", "notes": null}}"#,
        )
        .unwrap();
        assert_eq!(log.len(), 3);
        assert!(log.iter().all(|(_, e)| e.mood.is_none() && e.notes.is_empty()));

        let log: MoodLog = serde_json::from_str("null").unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn test_wrong_shapes_degrade_to_empty() {
        let log: MoodLog = serde_json::from_str(
            r#"{
                "2024-01-02": {"mood": "good", "notes": "hi"},
                "2024-01-03": "happy",
                "2024-01-04": {"mood": "low", "notes": [{"text": 5}, "stray", {"text": "ok"}]}
            }"#,
        )
        .unwrap();
        assert_eq!(log.len(), 3);
        let entry = log.get(day("2024-01-02")).unwrap();
        assert_eq!(entry.mood, Some(Mood::Good));
        assert!(entry.notes.is_empty());
        assert_eq!(log.mood_on(day("2024-01-03")), None);

        let notes = &log.get(day("2024-01-04")).unwrap().notes;
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text, "");
        assert_eq!(notes[1].text, "ok");

        for raw in ["[]", "[1, 2]", "\"x\"", "3", "false"] {
            let log: MoodLog = serde_json::from_str(raw).unwrap();
            assert!(log.is_empty(), "moods: {raw}");
        }
    }

    #[test]
    fn test_upsert_replaces() {
        let mut log = MoodLog::new();
        log.upsert(day("2024-01-01"), MoodEntry { mood: Some(Mood::Low), notes: vec![] });
        log.upsert(day("2024-01-01"), MoodEntry { mood: Some(Mood::Good), notes: vec![] });
        assert_eq!(log.len(), 1);
        assert_eq!(log.mood_on(day("2024-01-01")), Some(Mood::Good));
    }

    #[test]
    fn test_serializes_with_string_keys() {
        let mut log = MoodLog::new();
        log.upsert(day("2024-01-01"), MoodEntry { mood: Some(Mood::Happy), notes: vec![] });
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["2024-01-01"]["mood"], "happy");
    }
}
