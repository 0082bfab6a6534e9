//! Pomodoro countdown state machine.
//!
//! The engine does not own a clock. Whoever drives it owns a one-second tick
//! source, creates it only when `start` reports `Started` or `Resumed`, and
//! drops it as soon as the engine leaves `Running` (pause, reset, or a
//! `Completed` tick).
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --start--> Running
//!                    |  tick (remaining hits 0): Completed, back to Idle
//! any --reset--> Idle
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DayboardError, Result};
use crate::store::{DEFAULT_BREAK_MINUTES, DEFAULT_WORK_MINUTES, minutes_in_range};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Fresh countdown from the full work duration.
    Started,
    /// Continued from a pause with the remaining time intact.
    Resumed,
    /// Already running; no second tick source may be created.
    AlreadyRunning,
}

impl StartOutcome {
    pub fn needs_tick_source(self) -> bool {
        !matches!(self, StartOutcome::AlreadyRunning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Tick arrived while not running.
    Ignored,
    Ticked { remaining: u32 },
    /// Countdown reached zero; the engine is Idle again.
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerEngine {
    state: TimerState,
    remaining_seconds: u32,
    work_minutes: u32,
    break_minutes: u32,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(DEFAULT_WORK_MINUTES, DEFAULT_BREAK_MINUTES)
    }
}

impl TimerEngine {
    /// Minutes outside `1..=MAX_MINUTES` are replaced by the defaults.
    pub fn new(work_minutes: u32, break_minutes: u32) -> Self {
        let work_minutes = if minutes_in_range(work_minutes) {
            work_minutes
        } else {
            DEFAULT_WORK_MINUTES
        };
        let break_minutes = if minutes_in_range(break_minutes) {
            break_minutes
        } else {
            DEFAULT_BREAK_MINUTES
        };
        Self {
            state: TimerState::Idle,
            remaining_seconds: work_minutes * 60,
            work_minutes,
            break_minutes,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn work_minutes(&self) -> u32 {
        self.work_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    fn full_duration(&self) -> u32 {
        self.work_minutes * 60
    }

    pub fn start(&mut self) -> StartOutcome {
        match self.state {
            TimerState::Running => StartOutcome::AlreadyRunning,
            TimerState::Paused => {
                self.state = TimerState::Running;
                StartOutcome::Resumed
            }
            TimerState::Idle => {
                self.remaining_seconds = self.full_duration();
                self.state = TimerState::Running;
                StartOutcome::Started
            }
        }
    }

    pub fn tick(&mut self) -> TimerEvent {
        if self.state != TimerState::Running {
            return TimerEvent::Ignored;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            tracing::info!(work_minutes = self.work_minutes, "pomodoro complete");
            self.reset();
            return TimerEvent::Completed;
        }
        TimerEvent::Ticked {
            remaining: self.remaining_seconds,
        }
    }

    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.remaining_seconds = self.full_duration();
    }

    pub fn set_work_minutes(&mut self, minutes: u32) -> Result<()> {
        if !minutes_in_range(minutes) {
            return Err(DayboardError::InvalidMinutes(minutes));
        }
        self.work_minutes = minutes;
        if self.state == TimerState::Idle {
            self.remaining_seconds = self.full_duration();
        }
        Ok(())
    }

    /// Stored for configuration only; no transition consumes it yet.
    pub fn set_break_minutes(&mut self, minutes: u32) -> Result<()> {
        if !minutes_in_range(minutes) {
            return Err(DayboardError::InvalidMinutes(minutes));
        }
        self.break_minutes = minutes;
        Ok(())
    }

    /// `MM:SS` of the remaining time.
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }
}
