//! Daily averages over the most recent days of history.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{debug, warn};
use serde::Serialize;

use crate::MoodEntry;

/// Number of distinct days shown in the history chart.
pub const WINDOW_DAYS: usize = 7;

/// Mean mood for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAverage {
    pub date: NaiveDate,
    /// Abbreviated weekday, e.g. `Mon`
    pub label: String,
    pub mean: f64,
    /// Number of entries averaged
    pub count: usize,
}

/// Result of aggregating a history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregation {
    /// Oldest day first, at most [`WINDOW_DAYS`] long
    pub days: Vec<DailyAverage>,
    /// Entries dropped because their date could not be read
    pub skipped: usize,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Groups entries by calendar day and averages the last [`WINDOW_DAYS`] days
/// that have at least one entry.
///
/// Entries with an unreadable date are logged and left out; they never fail
/// the aggregation.
pub fn daily_averages(entries: &[MoodEntry]) -> Aggregation {
    let mut by_day: BTreeMap<NaiveDate, Vec<i64>> = BTreeMap::new();
    let mut skipped = 0;

    for entry in entries {
        match entry.calendar_day() {
            Some(day) => by_day.entry(day).or_default().push(entry.mood),
            None => {
                warn!(
                    "Skipping entry {} due to unexpected date format: {:?}",
                    entry.id, entry.date
                );
                skipped += 1;
            }
        }
    }

    let start = by_day.len().saturating_sub(WINDOW_DAYS);
    let days: Vec<DailyAverage> = by_day
        .into_iter()
        .skip(start)
        .map(|(date, moods)| {
            let sum: i64 = moods.iter().sum();
            DailyAverage {
                date,
                label: date.format("%a").to_string(),
                mean: sum as f64 / moods.len() as f64,
                count: moods.len(),
            }
        })
        .collect();

    debug!(
        "Aggregated {} entries into {} days ({} skipped)",
        entries.len(),
        days.len(),
        skipped
    );

    Aggregation { days, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, date: &str, mood: i64) -> MoodEntry {
        MoodEntry {
            id,
            date: date.to_string(),
            day: None,
            mood,
            notes: String::new(),
        }
    }

    #[test]
    fn same_day_entries_are_averaged() {
        let entries = vec![
            entry(1, "Mon, 2024-01-01 09:00 AM", 3),
            entry(2, "Mon, 2024-01-01 06:00 PM", 5),
        ];

        let result = daily_averages(&entries);

        assert_eq!(result.days.len(), 1);
        assert_eq!(result.days[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(result.days[0].label, "Mon");
        assert_eq!(result.days[0].mean, 4.0);
        assert_eq!(result.days[0].count, 2);
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn keeps_only_the_latest_seven_days_oldest_first() {
        // Ten days, inserted newest first to make sure ordering comes from the date.
        let entries: Vec<MoodEntry> = (1..=10)
            .rev()
            .map(|d| entry(d, &format!("Day, 2024-03-{:02} 10:00 AM", d), (d % 5) + 1))
            .collect();

        let result = daily_averages(&entries);

        let dates: Vec<u32> = result
            .days
            .iter()
            .map(|day| chrono::Datelike::day(&day.date))
            .collect();
        assert_eq!(dates, vec![4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn window_counts_distinct_days_not_consecutive_ones() {
        let entries = vec![
            entry(1, "Mon, 2024-01-01 09:00 AM", 1),
            entry(2, "Mon, 2024-02-01 09:00 AM", 2),
            entry(3, "Mon, 2024-03-01 09:00 AM", 3),
        ];

        let result = daily_averages(&entries);
        assert_eq!(result.days.len(), 3);
        assert_eq!(result.days[0].mean, 1.0);
        assert_eq!(result.days[2].mean, 3.0);
    }

    #[test]
    fn unparseable_dates_are_skipped() {
        let entries = vec![
            entry(1, "garbage", 5),
            entry(2, "Mon, 01/01/2024 09:00 AM", 5),
            entry(3, "Tue, 2024-01-02 09:00 AM", 2),
        ];

        let result = daily_averages(&entries);
        assert_eq!(result.days.len(), 1);
        assert_eq!(result.days[0].mean, 2.0);
        assert_eq!(result.skipped, 2);
    }

    #[test]
    fn empty_or_unreadable_history_has_no_data() {
        assert!(daily_averages(&[]).is_empty());

        let result = daily_averages(&[entry(1, "", 3), entry(2, "one-token", 4)]);
        assert!(result.is_empty());
        assert_eq!(result.skipped, 2);
    }

    #[test]
    fn structured_day_is_used_when_present() {
        let mut e = entry(1, "Monday 01.01.2024", 4);
        e.day = NaiveDate::from_ymd_opt(2024, 1, 1);

        let result = daily_averages(&[e]);
        assert_eq!(result.days.len(), 1);
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn non_integer_means_are_preserved() {
        let entries = vec![
            entry(1, "Wed, 2024-01-03 09:00 AM", 1),
            entry(2, "Wed, 2024-01-03 10:00 AM", 2),
            entry(3, "Wed, 2024-01-03 11:00 AM", 2),
        ];

        let result = daily_averages(&entries);
        assert!((result.days[0].mean - 5.0 / 3.0).abs() < f64::EPSILON);
    }
}
