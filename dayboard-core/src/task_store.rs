//! TaskStore: the persisted task list.
//!
//! Storage order is insertion order with the newest entry first. Listing
//! re-sorts by `created` (newest first) on every read without touching the
//! stored order. Every mutation rewrites the whole collection.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::store::{KeyValueStore, TASKS_KEY, load_collection, save_collection};
use crate::task::{IdSequence, NewEntry, Task, TaskFilter};

#[derive(Debug, Clone)]
pub struct TaskStore<S: KeyValueStore> {
    store: S,
    tasks: Vec<Task>,
    ids: IdSequence,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Load the persisted collection; absent or corrupted data starts empty.
    pub fn load(store: S) -> Self {
        let tasks: Vec<Task> = load_collection(&store, TASKS_KEY);
        let ids = IdSequence::seeded(&tasks);
        tracing::debug!(count = tasks.len(), "loaded tasks");
        Self { store, tasks, ids }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Stored order, newest inserted first.
    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn add(&mut self, draft: NewEntry, now: DateTime<Utc>) -> Result<Task> {
        let mut ids = self.ids;
        let task = draft.into_entry(ids.next(now), now)?;
        self.ids = ids;

        self.tasks.insert(0, task.clone());
        self.persist()?;
        tracing::debug!(id = task.id, name = %task.name, "added task");
        Ok(task)
    }

    /// Tasks matching `filter`, newest `created` first.
    pub fn list(&self, filter: TaskFilter) -> Vec<Task> {
        let mut out: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created.cmp(&a.created));
        out
    }

    /// Mark a task done. Completion removes it; nothing is archived.
    pub fn complete(&mut self, id: u64) -> Result<Option<Task>> {
        self.remove(id)
    }

    pub fn delete(&mut self, id: u64) -> Result<Option<Task>> {
        self.remove(id)
    }

    fn remove(&mut self, id: u64) -> Result<Option<Task>> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            tracing::debug!(id, "task not found, nothing removed");
            return Ok(None);
        };
        let task = self.tasks.remove(pos);
        self.persist()?;
        tracing::debug!(id, "removed task");
        Ok(Some(task))
    }

    fn persist(&self) -> Result<()> {
        save_collection(&self.store, TASKS_KEY, &self.tasks)?;
        Ok(())
    }
}
