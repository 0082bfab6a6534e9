//! Time utilities: injectable clock plus the relative-time and greeting helpers.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// "Just now", "5m ago", "3h ago".
pub fn format_time_ago(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - created).num_minutes();
    if minutes < 60 {
        return if minutes <= 0 {
            "Just now".to_string()
        } else {
            format!("{minutes}m ago")
        };
    }
    format!("{}h ago", minutes / 60)
}

/// Greeting for a local hour of day (0-23).
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        0..=5 => "Good Night",
        6..=11 => "Good Morning",
        12..=17 => "Good Afternoon",
        18..=23 => "Good Evening",
        _ => "Hello",
    }
}
