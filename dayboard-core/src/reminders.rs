//! ReminderStore: the persisted reminder list.
//!
//! Unlike tasks, reminders are listed in stored order (newest inserted
//! first). Positional deletion assumes the caller's index comes from the
//! latest `list()`; `delete` by id is the stable alternative.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::Result;
use crate::store::{KeyValueStore, REMINDERS_KEY, load_collection, save_collection};
use crate::task::{IdSequence, NewEntry, Reminder};

#[derive(Debug, Clone)]
pub struct ReminderStore<S: KeyValueStore> {
    store: S,
    reminders: Vec<Reminder>,
    ids: IdSequence,
}

impl<S: KeyValueStore> ReminderStore<S> {
    pub fn load(store: S) -> Self {
        let reminders: Vec<Reminder> = load_collection(&store, REMINDERS_KEY);
        let ids = IdSequence::seeded(&reminders);
        tracing::debug!(count = reminders.len(), "loaded reminders");
        Self {
            store,
            reminders,
            ids,
        }
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    pub fn add(&mut self, draft: NewEntry, now: DateTime<Utc>) -> Result<Reminder> {
        let mut ids = self.ids;
        let reminder = draft.into_entry(ids.next(now), now)?;
        self.ids = ids;

        self.reminders.insert(0, reminder.clone());
        self.persist()?;
        tracing::debug!(id = reminder.id, name = %reminder.name, "added reminder");
        Ok(reminder)
    }

    pub fn list(&self) -> &[Reminder] {
        &self.reminders
    }

    /// Remove the reminder at `index` in the current listing.
    pub fn delete_at(&mut self, index: usize) -> Result<Option<Reminder>> {
        if index >= self.reminders.len() {
            tracing::debug!(index, "reminder index out of range, nothing removed");
            return Ok(None);
        }
        let reminder = self.reminders.remove(index);
        self.persist()?;
        Ok(Some(reminder))
    }

    pub fn delete(&mut self, id: u64) -> Result<Option<Reminder>> {
        match self.reminders.iter().position(|r| r.id == id) {
            Some(index) => self.delete_at(index),
            None => Ok(None),
        }
    }

    fn persist(&self) -> Result<()> {
        save_collection(&self.store, REMINDERS_KEY, &self.reminders)?;
        Ok(())
    }
}

/// Human-readable schedule for a reminder, or "No time".
///
/// Stored dates carrying an offset are shown in `tz`; plain local
/// date-times are shown as entered.
pub fn schedule_label(reminder: &Reminder, tz: Tz) -> String {
    let Some(raw) = reminder.date.as_deref() else {
        return "No time".to_string();
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&tz).format("%b %-d, %Y %H:%M").to_string();
    }
    match reminder.scheduled_at() {
        Some(dt) => dt.format("%b %-d, %Y %H:%M").to_string(),
        None => "No time".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 13, 9, 0, 0).unwrap()
    }

    fn names<S: KeyValueStore>(store: &ReminderStore<S>) -> Vec<&str> {
        store.list().iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn list_is_insertion_order_newest_first() {
        let mut reminders = ReminderStore::load(MemoryStore::new());
        reminders.add(NewEntry::new("a"), t0()).unwrap();
        reminders.add(NewEntry::new("b"), t0()).unwrap();
        reminders.add(NewEntry::new("c"), t0()).unwrap();
        assert_eq!(names(&reminders), vec!["c", "b", "a"]);
    }

    #[test]
    fn delete_at_removes_by_position_and_persists() {
        let store = MemoryStore::new();
        let mut reminders = ReminderStore::load(store.clone());
        reminders.add(NewEntry::new("a"), t0()).unwrap();
        reminders.add(NewEntry::new("b"), t0()).unwrap();

        let removed = reminders.delete_at(1).unwrap().unwrap();
        assert_eq!(removed.name, "a");
        assert_eq!(names(&ReminderStore::load(store)), vec!["b"]);
    }

    #[test]
    fn out_of_range_index_is_a_no_op() {
        let mut reminders = ReminderStore::load(MemoryStore::new());
        reminders.add(NewEntry::new("a"), t0()).unwrap();
        assert!(reminders.delete_at(1).unwrap().is_none());
        assert!(reminders.delete(999).unwrap().is_none());
        assert_eq!(reminders.len(), 1);
    }

    #[test]
    fn delete_by_id_is_stable_across_inserts() {
        let mut reminders = ReminderStore::load(MemoryStore::new());
        let a = reminders.add(NewEntry::new("a"), t0()).unwrap();
        reminders.add(NewEntry::new("b"), t0()).unwrap();
        assert_eq!(reminders.delete(a.id).unwrap().map(|r| r.id), Some(a.id));
        assert_eq!(names(&reminders), vec!["b"]);
    }

    #[test]
    fn labels() {
        let tz: Tz = "America/Chicago".parse().unwrap();
        let none = NewEntry::new("x").into_entry(1, t0()).unwrap();
        assert_eq!(schedule_label(&none, tz), "No time");

        let local = NewEntry::new("x")
            .with_date("2026-02-13T09:00")
            .into_entry(2, t0())
            .unwrap();
        assert_eq!(schedule_label(&local, tz), "Feb 13, 2026 09:00");

        let utc = NewEntry::new("x")
            .with_date("2026-02-13T15:00:00Z")
            .into_entry(3, t0())
            .unwrap();
        assert_eq!(schedule_label(&utc, tz), "Feb 13, 2026 09:00");
    }
}
