//! Date and timestamp helpers for the timeline.
//!
//! Task bounds are millisecond Unix timestamps, always resolved to
//! midnight UTC so day arithmetic stays exact. Bare "day N" references
//! in chat commands count from a weekly anchor: day 1 is the most recent
//! Monday at or before the calendar's "today".

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

/// Milliseconds in one day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Invocation-scoped date context.
///
/// Built once per interpreted command so that "today" and the Monday
/// anchor are consistent across every bound in that command. Tests pin
/// it to a fixed date with [`Calendar::at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    today: NaiveDate,
}

impl Calendar {
    /// Calendar anchored to the current UTC date.
    pub fn today() -> Self {
        Self::at(Utc::now().date_naive())
    }

    /// Calendar anchored to an explicit date.
    pub fn at(today: NaiveDate) -> Self {
        Self { today }
    }

    /// The project-start reference: most recent Monday at or before today.
    pub fn anchor(&self) -> NaiveDate {
        let back = self.today.weekday().num_days_from_monday() as u64;
        self.today - Days::new(back)
    }

    /// Timestamp for "day N" of the project; day 1 is the anchor Monday
    /// and day N is anchor + (N - 1) days.
    ///
    /// Returns `None` when the offset leaves the supported calendar range.
    pub fn day(&self, n: i64) -> Option<i64> {
        self.anchor()
            .checked_add_signed(TimeDelta::days(n - 1))
            .map(date_to_ms)
    }

    /// Timestamp for today at midnight UTC.
    pub fn today_ms(&self) -> i64 {
        date_to_ms(self.today)
    }

    /// Year used when a chat command names a date without one.
    pub fn year(&self) -> i32 {
        self.today.year()
    }

    /// Parse a literal "month day" date ("june 15", "Mar 3") in this
    /// calendar's year.
    pub fn parse_month_day(&self, text: &str) -> Option<i64> {
        let candidate = format!("{} {}", text.trim(), self.year());
        NaiveDate::parse_from_str(&candidate, "%B %d %Y")
            .or_else(|_| NaiveDate::parse_from_str(&candidate, "%b %d %Y"))
            .ok()
            .map(date_to_ms)
    }
}

/// Midnight UTC of `date`, in milliseconds since the epoch.
pub fn date_to_ms(date: NaiveDate) -> i64 {
    NaiveDateTime::new(date, NaiveTime::MIN)
        .and_utc()
        .timestamp_millis()
}

/// Date portion of a millisecond timestamp, if representable.
pub fn ms_to_date(ts: i64) -> Option<NaiveDate> {
    chrono::DateTime::from_timestamp_millis(ts).map(|dt| dt.date_naive())
}

/// Shift a timestamp by whole days. `None` when the result would overflow.
pub fn add_days(ts: i64, days: i64) -> Option<i64> {
    days.checked_mul(MS_PER_DAY)
        .and_then(|delta| ts.checked_add(delta))
}

/// Whole days between two timestamps, rounded to nearest.
pub fn days_between(start: i64, end: i64) -> i64 {
    let delta = end - start;
    (delta + delta.signum() * MS_PER_DAY / 2) / MS_PER_DAY
}

/// Human-readable date for confirmation messages, e.g. "June 15, 2026".
pub fn format_ms(ts: i64) -> String {
    match ms_to_date(ts) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => ts.to_string(),
    }
}
