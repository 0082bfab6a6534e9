//! Entry model shared by tasks and reminders.
//!
//! Tasks and reminders have the same shape on disk, so they are the same
//! type. The JSON field names match what earlier versions of the widget
//! wrote, which keeps old data readable.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DayboardError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Work,
    Personal,
    Other,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Work, Category::Personal, Category::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DayboardError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DayboardError::InvalidCategory(s.to_string()))
    }
}

/// Listing filter: everything, or a single category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskFilter {
    #[default]
    All,
    Only(Category),
}

impl TaskFilter {
    pub fn matches(self, entry: &Entry) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Only(c) => entry.category == c,
        }
    }
}

impl FromStr for TaskFilter {
    type Err = DayboardError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(TaskFilter::All);
        }
        Ok(TaskFilter::Only(s.parse()?))
    }
}

/// A task or reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub category: Category,

    /// Kept for storage compatibility; completing a task removes it instead.
    #[serde(default)]
    pub completed: bool,

    pub created: DateTime<Utc>,

    /// Scheduled time as entered, e.g. `2026-02-13T09:00`.
    #[serde(default)]
    pub date: Option<String>,
}

pub type Task = Entry;
pub type Reminder = Entry;

impl Entry {
    /// The scheduled time, if any, as a naive local date-time.
    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_schedule)
    }

    /// True if `date` starts with `date_key` (`YYYY-MM-DD`).
    pub fn is_scheduled_on(&self, date_key: &str) -> bool {
        self.date
            .as_deref()
            .is_some_and(|d| d.starts_with(date_key))
    }
}

/// Unvalidated input for a new entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEntry {
    pub name: String,
    pub category: Option<Category>,
    pub date: Option<String>,
}

impl NewEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Validate and stamp the draft. No state is touched on error.
    pub fn into_entry(self, id: u64, created: DateTime<Utc>) -> Result<Entry> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DayboardError::EmptyName);
        }

        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(d) => {
                if parse_schedule(d).is_none() {
                    return Err(DayboardError::InvalidDate(d.to_string()));
                }
                Some(d.to_string())
            }
        };

        Ok(Entry {
            id,
            name: name.to_string(),
            category: self.category.unwrap_or_default(),
            completed: false,
            created,
            date,
        })
    }
}

/// Parse a scheduling timestamp in any of the accepted forms.
pub fn parse_schedule(s: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local())
}

/// Timestamp-derived ids that never repeat, even when two entries are
/// created within the same millisecond.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdSequence {
    last: u64,
}

impl IdSequence {
    /// Seed from existing entries so reloaded collections keep unique ids.
    ///
    /// An id at `u64::MAX` cannot be followed; such a seed is ignored.
    pub fn seeded<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Self {
        let last = entries
            .into_iter()
            .map(|e| e.id)
            .filter(|&id| id < u64::MAX)
            .max()
            .unwrap_or(0);
        Self { last }
    }

    pub fn next(&mut self, now: DateTime<Utc>) -> u64 {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 13, h, m, 0).unwrap()
    }

    #[test]
    fn blank_names_are_rejected() {
        for name in ["", "   ", "\t\n"] {
            let err = NewEntry::new(name).into_entry(1, at(9, 0)).unwrap_err();
            assert!(matches!(err, DayboardError::EmptyName));
        }
    }

    #[test]
    fn draft_is_trimmed_and_defaulted() {
        let e = NewEntry::new("  write report ")
            .with_date("")
            .into_entry(7, at(9, 0))
            .unwrap();
        assert_eq!(e.name, "write report");
        assert_eq!(e.category, Category::Work);
        assert_eq!(e.date, None);
        assert!(!e.completed);
    }

    #[test]
    fn bad_dates_are_rejected() {
        let err = NewEntry::new("x")
            .with_date("next tuesday")
            .into_entry(1, at(9, 0))
            .unwrap_err();
        assert!(matches!(err, DayboardError::InvalidDate(_)));
    }

    #[test]
    fn accepted_schedule_forms() {
        assert!(parse_schedule("2026-02-13T09:00").is_some());
        assert!(parse_schedule("2026-02-13T09:00:30").is_some());
        assert!(parse_schedule("2026-02-13").is_some());
        assert!(parse_schedule("2026-02-13T09:00:00Z").is_some());
        assert!(parse_schedule("2026-02-30T09:00").is_none());
    }

    #[test]
    fn category_and_filter_parse() {
        assert_eq!("personal".parse::<Category>().unwrap(), Category::Personal);
        assert!("errands".parse::<Category>().is_err());
        assert_eq!("All".parse::<TaskFilter>().unwrap(), TaskFilter::All);
        assert_eq!(
            "Other".parse::<TaskFilter>().unwrap(),
            TaskFilter::Only(Category::Other)
        );
    }

    #[test]
    fn ids_are_monotonic_within_one_millisecond() {
        let mut ids = IdSequence::default();
        let now = at(9, 0);
        let a = ids.next(now);
        let b = ids.next(now);
        let c = ids.next(now);
        assert_eq!(a, now.timestamp_millis() as u64);
        assert!(a < b && b < c);
    }

    #[test]
    fn seeded_sequence_skips_existing_ids() {
        let future = at(23, 0);
        let existing = NewEntry::new("a")
            .into_entry(future.timestamp_millis() as u64, future)
            .unwrap();
        let mut ids = IdSequence::seeded([&existing]);
        assert!(ids.next(at(9, 0)) > existing.id);
    }

    #[test]
    fn sequence_survives_maximum_id() {
        let existing = NewEntry::new("a").into_entry(u64::MAX, at(9, 0)).unwrap();
        let mut ids = IdSequence::seeded([&existing]);
        let id = ids.next(at(9, 0));
        assert_eq!(id, at(9, 0).timestamp_millis() as u64);
        assert_ne!(id, existing.id);

        let mut ids = IdSequence { last: u64::MAX - 1 };
        assert_eq!(ids.next(at(9, 0)), u64::MAX);
        assert_eq!(ids.next(at(9, 0)), u64::MAX);
    }

    #[test]
    fn stored_json_shape() {
        let e = NewEntry::new("call mom")
            .with_category(Category::Personal)
            .with_date("2026-02-13T09:00")
            .into_entry(1770973200000, at(9, 0))
            .unwrap();
        let v: serde_json::Value = serde_json::to_value(&e).unwrap();
        assert_eq!(v["id"], 1770973200000u64);
        assert_eq!(v["category"], "Personal");
        assert_eq!(v["completed"], false);
        assert_eq!(v["date"], "2026-02-13T09:00");
        assert!(e.is_scheduled_on("2026-02-13"));
        assert!(!e.is_scheduled_on("2026-02-14"));
    }

    #[test]
    fn reads_entries_written_without_optional_fields() {
        let raw = r#"{"id":5,"name":"legacy","created":"2026-02-01T10:00:00.000Z"}"#;
        let e: Entry = serde_json::from_str(raw).unwrap();
        assert_eq!(e.category, Category::Work);
        assert_eq!(e.date, None);
    }
}
