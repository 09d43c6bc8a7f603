// src/models.rs

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use std::fmt;

pub const DAY_MILLIS: i64 = 86_400_000;

/// Display format for entry dates, e.g. "Aug 3, 2024". Search matches against it.
pub const DATE_DISPLAY_FORMAT: &str = "%b %-d, %Y";

/// A single journal record.
///
/// `id` is 0 until the store assigns one on insert. `date` holds epoch
/// milliseconds at local midnight of the entry's day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub id: i64,
    pub content: String,
    pub mood: i32,
    pub tags: Tags,
    pub date: i64,
}

impl JournalEntry {
    /// A transient entry for the given day. The date is normalized to start of day.
    pub fn new(content: impl Into<String>, mood: i32, tags: Tags, date: i64) -> Self {
        JournalEntry {
            id: 0,
            content: content.into(),
            mood,
            tags,
            date: start_of_day(date),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }

    pub fn formatted_date(&self) -> String {
        format_date(self.date)
    }
}

/// Ordered tag labels, stored as one comma-joined string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<String>);

impl Tags {
    pub const DELIMITER: char = ',';

    /// Splits a comma-joined string, trimming each label and dropping blanks.
    pub fn parse(raw: &str) -> Self {
        Tags(
            raw.split(Self::DELIMITER)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

/// Converts epoch milliseconds to local time. Out-of-range values collapse to the epoch.
pub fn local_datetime(millis: i64) -> DateTime<Local> {
    Local.timestamp_millis_opt(millis).earliest().unwrap_or_default()
}

/// The local calendar day containing `millis`.
pub fn day_of(millis: i64) -> NaiveDate {
    local_datetime(millis).date_naive()
}

/// Epoch milliseconds of local midnight on `day`.
pub fn day_start_millis(day: NaiveDate) -> i64 {
    let midnight = day.and_hms_opt(0, 0, 0).unwrap_or_default();
    match Local.from_local_datetime(&midnight).earliest() {
        Some(dt) => dt.timestamp_millis(),
        // midnight skipped by a DST jump
        None => midnight.and_utc().timestamp_millis(),
    }
}

/// Truncates a timestamp to 00:00:00.000 local time.
pub fn start_of_day(millis: i64) -> i64 {
    day_start_millis(day_of(millis))
}

pub fn format_date(millis: i64) -> String {
    local_datetime(millis).format(DATE_DISPLAY_FORMAT).to_string()
}
