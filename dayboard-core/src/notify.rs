//! Transient user-facing messages.
//!
//! Each message lives on its own timeline: hidden for `SHOW_DELAY`, visible
//! until `LIFETIME`, then fading for `FADE` before it can be pruned.
//! Messages may overlap; there is no dedup.

use chrono::{DateTime, Duration, Utc};

pub const SHOW_DELAY_MS: i64 = 100;
pub const LIFETIME_MS: i64 = 4000;
pub const FADE_MS: i64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pending,
    Shown,
    Fading,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub created: DateTime<Utc>,
}

impl Notification {
    pub fn phase(&self, now: DateTime<Utc>) -> Phase {
        let age = now - self.created;
        if age < Duration::milliseconds(SHOW_DELAY_MS) {
            Phase::Pending
        } else if age < Duration::milliseconds(LIFETIME_MS) {
            Phase::Shown
        } else if age < Duration::milliseconds(LIFETIME_MS + FADE_MS) {
            Phase::Fading
        } else {
            Phase::Expired
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    items: Vec<Notification>,
    next_id: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, now: DateTime<Utc>) -> u64 {
        self.next_id += 1;
        let message = message.into();
        tracing::debug!(id = self.next_id, %message, "notification");
        self.items.push(Notification {
            id: self.next_id,
            message,
            created: now,
        });
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insertion order, including pending and fading messages.
    pub fn all(&self) -> &[Notification] {
        &self.items
    }

    pub fn visible(&self, now: DateTime<Utc>) -> Vec<&Notification> {
        self.items
            .iter()
            .filter(|n| n.phase(now) == Phase::Shown)
            .collect()
    }

    /// Drop messages whose fade has finished.
    pub fn prune(&mut self, now: DateTime<Utc>) {
        self.items.retain(|n| n.phase(now) != Phase::Expired);
    }

    /// Take every queued message regardless of phase.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.items)
    }
}
