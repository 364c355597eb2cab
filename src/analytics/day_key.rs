//! Calendar day keys.
//!
//! Every completion and mood entry is tracked per calendar day, stored as a
//! `YYYY-MM-DD` string. `DayKey` is the parsed form used everywhere in the
//! analytics core.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Local, Months, NaiveDate, TimeZone, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid day key: {0:?}")]
pub struct ParseDayKeyError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Local wall-clock date. Only the HTTP layer should call this; the
    /// analytics functions always receive `today` as an argument.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Normalize a timestamp to the calendar day it falls on in its own zone.
    pub fn from_datetime<Tz: TimeZone>(ts: &DateTime<Tz>) -> Self {
        Self(ts.date_naive())
    }

    pub fn previous(self) -> Self {
        self.offset(-1)
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    pub fn offset(self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// Short label, Sunday first.
    pub fn weekday_label(self) -> &'static str {
        DAY_LABELS[self.0.weekday().num_days_from_sunday() as usize]
    }

    pub fn is_weekend(self) -> bool {
        matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn same_month(self, other: DayKey) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

/// Accepts a bare `YYYY-MM-DD` or anything that starts with one, such as a
/// full ISO-8601 timestamp.
impl FromStr for DayKey {
    type Err = ParseDayKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let head = s.trim().get(..10).ok_or_else(|| ParseDayKeyError(s.to_string()))?;
        NaiveDate::parse_from_str(head, DAY_KEY_FORMAT)
            .map(Self)
            .map_err(|_| ParseDayKeyError(s.to_string()))
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The `n` days ending at `today`, oldest first.
pub fn last_n_days(today: DayKey, n: usize) -> Vec<DayKey> {
    (0..n as i64).rev().map(|back| today.offset(-back)).collect()
}

/// Sunday through Saturday of the week containing `day`.
pub fn week_of(day: DayKey) -> [DayKey; 7] {
    let sunday = day.offset(-(day.weekday().num_days_from_sunday() as i64));
    std::array::from_fn(|i| sunday.offset(i as i64))
}

/// Layout facts for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSpan {
    pub first: DayKey,
    pub days: u32,
    /// Weekday of the 1st, 0 = Sunday.
    pub first_weekday: u32,
}

impl MonthSpan {
    pub fn containing(day: DayKey) -> Self {
        let first = day.offset(-(day.0.day0() as i64));
        // The month holding NaiveDate::MAX has no successor and ends on it.
        let last = first
            .0
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        Self {
            first,
            days: last.day(),
            first_weekday: first.weekday().num_days_from_sunday(),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn iter_days(&self) -> impl Iterator<Item = DayKey> {
        let first = self.first;
        (0..self.days as i64).map(move |i| first.offset(i))
    }
}

#[cfg(test)]
pub(crate) fn day(s: &str) -> DayKey {
    s.parse().expect("valid day key in test")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_parse_plain_and_timestamp() {
        assert_eq!(day("2024-01-03").to_string(), "2024-01-03");
        assert_eq!(day("2024-01-03T22:15:00.000Z").to_string(), "2024-01-03");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<DayKey>().is_err());
        assert!("2024-13-01".parse::<DayKey>().is_err());
        assert!("yesterday!!".parse::<DayKey>().is_err());
        assert!("2024-1-1".parse::<DayKey>().is_err());
    }

    #[test]
    fn test_previous_crosses_month_and_year() {
        assert_eq!(day("2024-03-01").previous(), day("2024-02-29"));
        assert_eq!(day("2024-01-01").previous(), day("2023-12-31"));
        assert_eq!(day("2023-12-31").next(), day("2024-01-01"));
    }

    #[test]
    fn test_from_datetime_uses_its_own_zone() {
        let utc = Utc.with_ymd_and_hms(2024, 5, 1, 23, 30, 0).unwrap();
        assert_eq!(DayKey::from_datetime(&utc), day("2024-05-01"));

        let plus_two = utc.with_timezone(&FixedOffset::east_opt(2 * 3600).unwrap());
        assert_eq!(DayKey::from_datetime(&plus_two), day("2024-05-02"));
    }

    #[test]
    fn test_last_n_days_oldest_first() {
        let days = last_n_days(day("2024-01-03"), 3);
        assert_eq!(days, vec![day("2024-01-01"), day("2024-01-02"), day("2024-01-03")]);
        assert!(last_n_days(day("2024-01-03"), 0).is_empty());
    }

    #[test]
    fn test_weekday_helpers() {
        // 2024-01-06 is a Saturday
        assert_eq!(day("2024-01-06").weekday_label(), "Sat");
        assert!(day("2024-01-06").is_weekend());
        assert!(day("2024-01-07").is_weekend());
        assert!(!day("2024-01-08").is_weekend());
    }

    #[test]
    fn test_week_of_starts_on_sunday() {
        let week = week_of(day("2024-01-03"));
        assert_eq!(week[0], day("2023-12-31"));
        assert_eq!(week[6], day("2024-01-06"));
    }

    #[test]
    fn test_month_span() {
        let feb = MonthSpan::containing(day("2024-02-17"));
        assert_eq!(feb.days, 29);
        // 2024-02-01 was a Thursday
        assert_eq!(feb.first_weekday, 4);
        assert_eq!(feb.first, day("2024-02-01"));
        assert_eq!(feb.iter_days().last(), Some(day("2024-02-29")));

        assert_eq!(MonthSpan::containing(day("2023-02-10")).days, 28);
        assert_eq!(MonthSpan::containing(day("1900-02-10")).days, 28);
        assert_eq!(MonthSpan::containing(day("2000-02-10")).days, 29);
    }

    #[test]
    fn test_month_span_lengths() {
        let lengths: Vec<u32> = (1..=12)
            .map(|m| MonthSpan::containing(DayKey::from_ymd(2023, m, 1).unwrap()).days)
            .collect();
        assert_eq!(lengths, vec![31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);

        let dec = MonthSpan::containing(day("2023-12-31"));
        assert_eq!(dec.days, 31);
        assert_eq!(dec.iter_days().last(), Some(day("2023-12-31")));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&day("2024-07-04")).unwrap();
        assert_eq!(json, "\"2024-07-04\"");
        let back: DayKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, day("2024-07-04"));
    }
}
