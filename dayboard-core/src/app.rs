//! Application state: one `Dayboard` per process, built at startup with an
//! injected store and clock and passed by reference to every handler.
//!
//! Each intent mutates a store, the store persists, and the caller re-reads
//! state through the accessors. User-facing messages land in the
//! notification queue.

use chrono::{NaiveDate, Timelike};
use chrono_tz::Tz;

use crate::calendar::{CalendarIndex, MonthGrid, TodayPolicy, reference_date};
use crate::error::{DayboardError, Result};
use crate::notify::NotificationQueue;
use crate::reminders::{ReminderStore, schedule_label};
use crate::store::{
    BREAK_MINUTES_KEY, DEFAULT_BREAK_MINUTES, DEFAULT_WORK_MINUTES, KeyValueStore,
    WORK_MINUTES_KEY, load_minutes, save_minutes,
};
use crate::task::{NewEntry, Reminder, Task, TaskFilter};
use crate::task_store::TaskStore;
use crate::time::{Clock, format_time_ago, greeting};
use crate::timer::{StartOutcome, TimerEngine, TimerEvent};

pub const EMPTY_NAME_MESSAGE: &str = "Please enter a task name!";
pub const TIMER_DONE_MESSAGE: &str = "⏰ Time's up! Take a break 🎉";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub today: TodayPolicy,
    pub timezone: Tz,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            today: TodayPolicy::Fixed,
            timezone: chrono_tz::America::Chicago,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Tasks,
    Reminders,
    Timer,
    Calendar,
}

/// What a tab switch asks the presentation layer to refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Refresh {
    pub tasks: bool,
    pub calendar: bool,
}

pub struct Dayboard<S: KeyValueStore, C: Clock> {
    store: S,
    clock: C,
    settings: Settings,
    tasks: TaskStore<S>,
    reminders: ReminderStore<S>,
    timer: TimerEngine,
    calendar: CalendarIndex,
    notifications: NotificationQueue,
    active_tab: Tab,
}

impl<S: KeyValueStore + Clone, C: Clock> Dayboard<S, C> {
    /// Load collections and timer settings from `store`.
    pub fn open(store: S, clock: C, settings: Settings) -> Self {
        let tasks = TaskStore::load(store.clone());
        let reminders = ReminderStore::load(store.clone());
        let timer = TimerEngine::new(
            load_minutes(&store, WORK_MINUTES_KEY, DEFAULT_WORK_MINUTES),
            load_minutes(&store, BREAK_MINUTES_KEY, DEFAULT_BREAK_MINUTES),
        );
        tracing::debug!(
            tasks = tasks.len(),
            reminders = reminders.len(),
            work_minutes = timer.work_minutes(),
            "dayboard opened"
        );

        Self {
            store,
            clock,
            settings,
            tasks,
            reminders,
            timer,
            calendar: CalendarIndex::default(),
            notifications: NotificationQueue::new(),
            active_tab: Tab::default(),
        }
    }
}

impl<S: KeyValueStore, C: Clock> Dayboard<S, C> {
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn notify(&mut self, message: impl Into<String>) {
        let now = self.clock.now();
        self.notifications.push(message, now);
    }

    /// Surface validation failures to the user; storage failures propagate as-is.
    fn report<T>(&mut self, result: Result<T>) -> Result<T> {
        let message = match &result {
            Err(DayboardError::EmptyName) => Some(EMPTY_NAME_MESSAGE.to_string()),
            Err(e) if e.is_validation() => Some(e.to_string()),
            _ => None,
        };
        if let Some(message) = message {
            self.notify(message);
        }
        result
    }

    pub fn add_task(&mut self, draft: NewEntry) -> Result<Task> {
        let now = self.clock.now();
        let result = self.tasks.add(draft, now);
        let task = self.report(result)?;
        self.notify(format!("✅ Task \"{}\" added!", task.name));
        Ok(task)
    }

    pub fn list_tasks(&self, filter: TaskFilter) -> Vec<Task> {
        self.tasks.list(filter)
    }

    pub fn complete_task(&mut self, id: u64) -> Result<Option<Task>> {
        let removed = self.tasks.complete(id)?;
        if let Some(task) = &removed {
            self.notify(format!("✅ \"{}\" completed & removed!", task.name));
        }
        Ok(removed)
    }

    pub fn delete_task(&mut self, id: u64) -> Result<Option<Task>> {
        let removed = self.tasks.delete(id)?;
        if let Some(task) = &removed {
            self.notify(format!("🗑️ \"{}\" deleted", task.name));
        }
        Ok(removed)
    }

    pub fn time_ago(&self, task: &Task) -> String {
        format_time_ago(task.created, self.clock.now())
    }

    pub fn add_reminder(&mut self, draft: NewEntry) -> Result<Reminder> {
        let now = self.clock.now();
        let result = self.reminders.add(draft, now);
        let reminder = self.report(result)?;
        self.notify(format!("🔔 Reminder \"{}\" added!", reminder.name));
        Ok(reminder)
    }

    pub fn reminders(&self) -> &[Reminder] {
        self.reminders.list()
    }

    pub fn delete_reminder_at(&mut self, index: usize) -> Result<Option<Reminder>> {
        self.reminders.delete_at(index)
    }

    pub fn delete_reminder(&mut self, id: u64) -> Result<Option<Reminder>> {
        self.reminders.delete(id)
    }

    pub fn reminder_label(&self, reminder: &Reminder) -> String {
        schedule_label(reminder, self.settings.timezone)
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn start_timer(&mut self) -> StartOutcome {
        self.timer.start()
    }

    pub fn pause_timer(&mut self) {
        self.timer.pause();
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
    }

    pub fn tick_timer(&mut self) -> TimerEvent {
        let event = self.timer.tick();
        if event == TimerEvent::Completed {
            self.notify(TIMER_DONE_MESSAGE);
        }
        event
    }

    pub fn set_work_minutes(&mut self, minutes: u32) -> Result<()> {
        let result = self.timer.set_work_minutes(minutes);
        self.report(result)?;
        save_minutes(&self.store, WORK_MINUTES_KEY, minutes)?;
        Ok(())
    }

    pub fn set_break_minutes(&mut self, minutes: u32) -> Result<()> {
        let result = self.timer.set_break_minutes(minutes);
        self.report(result)?;
        save_minutes(&self.store, BREAK_MINUTES_KEY, minutes)?;
        Ok(())
    }

    pub fn calendar(&self) -> &CalendarIndex {
        &self.calendar
    }

    pub fn next_month(&mut self) -> (i32, u32) {
        self.calendar.next_month()
    }

    pub fn prev_month(&mut self) -> (i32, u32) {
        self.calendar.prev_month()
    }

    /// The date carrying the "today" marker under the configured policy.
    pub fn today(&self) -> Option<NaiveDate> {
        match self.settings.today {
            TodayPolicy::Fixed => reference_date(),
            TodayPolicy::Live => Some(
                self.clock
                    .now()
                    .with_timezone(&self.settings.timezone)
                    .date_naive(),
            ),
        }
    }

    pub fn render_calendar(&self) -> MonthGrid {
        self.calendar.render(self.tasks.as_slice(), self.today())
    }

    /// Pre-fill value for a new entry's date, announced to the user.
    pub fn select_day(&mut self, day: u32) -> Option<String> {
        let picked = self.calendar.select_day(day)?;
        let title = self.render_calendar().title;
        self.notify(format!("📅 Date selected: {day} {title}"));
        Some(picked)
    }

    pub fn greeting(&self) -> &'static str {
        let hour = self.clock.now().with_timezone(&self.settings.timezone).hour();
        greeting(hour)
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn switch_tab(&mut self, tab: Tab) -> Refresh {
        self.active_tab = tab;
        Refresh {
            tasks: tab == Tab::Tasks,
            calendar: tab == Tab::Calendar,
        }
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }
}
