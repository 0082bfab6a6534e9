//! Month view: which days of the displayed month carry scheduled tasks.
//!
//! Day matching is a string-prefix test of the task's `date` against
//! `YYYY-MM-DD`; time of day is ignored. Months are 0-based (January = 0).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::task::Task;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Time of day used when a calendar day pre-fills a new entry.
pub const DEFAULT_PICK_TIME: &str = "09:00";

/// Startup month and the fixed "today" marker.
pub const REFERENCE_YEAR: i32 = 2026;
pub const REFERENCE_MONTH: u32 = 1;
pub const REFERENCE_DAY: u32 = 13;

/// How the "today" cell is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodayPolicy {
    /// Always 2026-02-13, regardless of the wall clock.
    #[default]
    Fixed,
    /// The clock's current local date.
    Live,
}

pub fn reference_date() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(REFERENCE_YEAR, REFERENCE_MONTH + 1, REFERENCE_DAY)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    /// `YYYY-MM-DD`
    pub date_key: String,
    pub has_event: bool,
    pub today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// e.g. "February 2026"
    pub title: String,
    /// Blank cells before day 1 (weekday of day 1, Sunday = 0).
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
}

impl MonthGrid {
    /// Seven-column weeks, `None` for blank cells.
    pub fn rows(&self) -> Vec<Vec<Option<&DayCell>>> {
        let cells: Vec<Option<&DayCell>> = (0..self.leading_blanks)
            .map(|_| None)
            .chain(self.days.iter().map(Some))
            .collect();
        cells.chunks(7).map(|week| week.to_vec()).collect()
    }

    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.days.iter().find(|c| c.day == day)
    }
}

fn date_key(year: i32, month: u32, day: u32) -> String {
    format!("{year:04}-{:02}-{day:02}", month + 1)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (ny, nm) = if month == 11 { (year + 1, 1) } else { (year, month + 2) };
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

/// Build the grid for `(year, month)`. `today` marks at most one cell.
pub fn render(year: i32, month: u32, tasks: &[Task], today: Option<NaiveDate>) -> MonthGrid {
    let first = NaiveDate::from_ymd_opt(year, month + 1, 1);
    let leading_blanks = first
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0);
    let title = first
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_default();

    let days = (1..=days_in_month(year, month))
        .map(|day| {
            let key = date_key(year, month, day);
            DayCell {
                day,
                has_event: tasks.iter().any(|t| t.is_scheduled_on(&key)),
                today: today.is_some_and(|d| {
                    d.year() == year && d.month0() == month && d.day() == day
                }),
                date_key: key,
            }
        })
        .collect();

    MonthGrid {
        year,
        month,
        title,
        leading_blanks,
        days,
    }
}

/// Session-only cursor over displayed months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarIndex {
    year: i32,
    month: u32,
}

impl Default for CalendarIndex {
    fn default() -> Self {
        Self {
            year: REFERENCE_YEAR,
            month: REFERENCE_MONTH,
        }
    }
}

impl CalendarIndex {
    /// `month` outside 0-11 is normalised into the right year.
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year: year + (month / 12) as i32,
            month: month % 12,
        }
    }

    pub fn current(&self) -> (i32, u32) {
        (self.year, self.month)
    }

    pub fn next_month(&mut self) -> (i32, u32) {
        if self.month == 11 {
            self.month = 0;
            self.year += 1;
        } else {
            self.month += 1;
        }
        self.current()
    }

    pub fn prev_month(&mut self) -> (i32, u32) {
        if self.month == 0 {
            self.month = 11;
            self.year -= 1;
        } else {
            self.month -= 1;
        }
        self.current()
    }

    pub fn render(&self, tasks: &[Task], today: Option<NaiveDate>) -> MonthGrid {
        render(self.year, self.month, tasks, today)
    }

    /// Date string for pre-filling a new entry, e.g. `2026-02-13T09:00`.
    pub fn select_day(&self, day: u32) -> Option<String> {
        if day == 0 || day > days_in_month(self.year, self.month) {
            return None;
        }
        Some(format!(
            "{}T{DEFAULT_PICK_TIME}",
            date_key(self.year, self.month, day)
        ))
    }
}
