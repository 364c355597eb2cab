use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::habit::Habit;
use super::mood::MoodLog;

/// Everything the analytics need about one user, as handed over by the
/// storage API. Missing or malformed sections default to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub habits: Vec<Habit>,

    #[serde(default)]
    pub moods: MoodLog,
}

/// Opaque identifier. Older clients sent numeric ids, so integers are
/// accepted and normalized to their decimal string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Self(s),
            Value::Number(n) => Self(n.to_string()),
            _ => Self::default(),
        })
    }
}

/// Reads `T`, falling back to its default for `null` or a value of the
/// wrong shape.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Ok(value_or_default(Value::deserialize(deserializer)?))
}

pub(crate) fn value_or_default<T: Default + DeserializeOwned>(raw: Value) -> T {
    if raw.is_null() {
        return T::default();
    }
    serde_json::from_value(raw).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Replacing malformed field with its default");
        T::default()
    })
}

/// A list whose malformed items are dropped. Anything but an array reads as
/// an empty list.
pub(crate) fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            tracing::debug!(raw = %other, "Expected a list, ignoring value");
            return Ok(Vec::new());
        }
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(error = %e, "Dropping malformed list item");
                None
            }
        })
        .collect())
}

/// RFC 3339 string or epoch milliseconds; anything else becomes `None`.
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    })
}
