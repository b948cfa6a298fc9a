//! Core data structures for mood entries.
//!
//! A `MoodEntry` is one saved rating. The display timestamp is kept exactly as
//! it was written; the calendar day is stored next to it so grouping never has
//! to depend on the display format.
use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::{MoodError, Result};

/// Format of the human-readable timestamp, e.g. `Monday, 2024-01-01 09:00 AM`.
pub const DISPLAY_FORMAT: &str = "%A, %Y-%m-%d %I:%M %p";

/// Format of the calendar-date token inside the display timestamp.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

pub const MIN_MOOD: i64 = 1;
pub const MAX_MOOD: i64 = 5;

pub const RANGE_MESSAGE: &str = "Please enter a mood rating between 1 and 5.";

/// Guide shown next to the mood field, highest rating first.
pub const MOOD_GUIDE: [(i64, &str); 5] = [
    (5, "Very Happy 😊"),
    (4, "Happy 🙂"),
    (3, "Neutral 😐"),
    (2, "Sad 😔"),
    (1, "Very Sad 😢"),
];

/// A mood rating that has passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MoodRating(u8);

impl MoodRating {
    pub fn new(value: i64) -> Result<Self> {
        if (MIN_MOOD..=MAX_MOOD).contains(&value) {
            Ok(MoodRating(value as u8))
        } else {
            Err(MoodError::validation(RANGE_MESSAGE))
        }
    }

    pub fn value(self) -> i64 {
        i64::from(self.0)
    }

    /// Label from the mood guide, e.g. `Neutral 😐`.
    pub fn description(self) -> &'static str {
        MOOD_GUIDE
            .iter()
            .find(|(rating, _)| *rating == self.value())
            .map(|(_, text)| *text)
            .unwrap_or("")
    }
}

impl fmt::Display for MoodRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One stored mood record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodEntry {
    /// Identity assigned by the store
    pub id: i64,
    /// Human-formatted timestamp, see [`DISPLAY_FORMAT`]
    pub date: String,
    /// Calendar day of the entry; absent for rows written before the column existed
    pub day: Option<NaiveDate>,
    /// Rating as stored; the store does not enforce the 1-5 range
    pub mood: i64,
    /// Free-text notes, possibly empty
    pub notes: String,
}

impl MoodEntry {
    /// Calendar day used for grouping.
    ///
    /// Prefers the structured `day` and falls back to the second whitespace
    /// token of the display string.
    pub fn calendar_day(&self) -> Option<NaiveDate> {
        self.day.or_else(|| day_from_display(&self.date))
    }
}

/// Formats a timestamp the way entries are displayed.
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(DISPLAY_FORMAT).to_string()
}

/// Current local wall-clock time.
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Extracts the calendar day from a display timestamp.
///
/// Only the second whitespace-separated token is looked at, so the weekday
/// prefix may be full (`Monday,`) or abbreviated (`Mon,`).
pub fn day_from_display(date: &str) -> Option<NaiveDate> {
    let token = date.split_whitespace().nth(1)?;
    NaiveDate::parse_from_str(token, DAY_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_accepts_exactly_one_through_five() {
        for value in -3..=9 {
            let accepted = MoodRating::new(value).is_ok();
            assert_eq!(accepted, (1..=5).contains(&value), "value {}", value);
        }
    }

    #[test]
    fn rating_rejection_is_a_validation_error() {
        let err = MoodRating::new(6).unwrap_err();
        assert!(matches!(err, MoodError::Validation { .. }));
        assert_eq!(err.to_string(), "Please enter a mood rating between 1 and 5.");
    }

    #[test]
    fn rating_descriptions_follow_the_guide() {
        assert_eq!(MoodRating::new(5).unwrap().description(), "Very Happy 😊");
        assert_eq!(MoodRating::new(1).unwrap().description(), "Very Sad 😢");
    }

    #[test]
    fn display_timestamp_matches_expected_shape() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(18, 5, 0)
            .unwrap();
        assert_eq!(format_timestamp(ts), "Monday, 2024-01-01 06:05 PM");
    }

    #[test]
    fn day_is_read_from_second_token() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert_eq!(day_from_display("Mon, 2024-01-01 09:00 AM"), expected);
        assert_eq!(day_from_display("Monday, 2024-01-01 06:00 PM"), expected);
        assert_eq!(day_from_display("2024-01-01"), None);
        assert_eq!(day_from_display("Monday, 01/01/2024 09:00 AM"), None);
        assert_eq!(day_from_display(""), None);
    }

    #[test]
    fn structured_day_wins_over_display_string() {
        let entry = MoodEntry {
            id: 1,
            date: "garbage".to_string(),
            day: NaiveDate::from_ymd_opt(2024, 3, 2),
            mood: 3,
            notes: String::new(),
        };
        assert_eq!(entry.calendar_day(), NaiveDate::from_ymd_opt(2024, 3, 2));
    }
}
