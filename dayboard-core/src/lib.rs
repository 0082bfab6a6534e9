//! dayboard-core: tasks, reminders, a pomodoro timer and a month calendar,
//! persisted to a string-keyed store.

pub mod app;
pub mod calendar;
pub mod error;
pub mod notify;
pub mod reminders;
pub mod store;
pub mod task;
pub mod task_store;
pub mod time;
pub mod timer;

pub use app::{Dayboard, Refresh, Settings, Tab};
pub use calendar::{CalendarIndex, DayCell, MonthGrid, TodayPolicy, WEEKDAY_LABELS};
pub use error::{DayboardError, Result};
pub use notify::{Notification, NotificationQueue, Phase};
pub use reminders::ReminderStore;
pub use store::{FileStore, KeyValueStore, MAX_MINUTES, MemoryStore, StoreError};
pub use task::{Category, Entry, IdSequence, NewEntry, Reminder, Task, TaskFilter};
pub use task_store::TaskStore;
pub use time::{Clock, FixedClock, SystemClock, format_time_ago, greeting};
pub use timer::{StartOutcome, TimerEngine, TimerEvent, TimerState};
