use anyhow::Result;
use clap::Subcommand;
use dayboard_core::{Clock, Dayboard, KeyValueStore, TimerEvent};
use std::io::Write;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use crate::print_notifications;

#[derive(Subcommand, Debug)]
pub enum TimerCommand {
    /// Run a work session in the foreground (Ctrl-C pauses and exits)
    Run,

    /// Show the configured durations
    Show,

    /// Set work/break minutes
    Config {
        #[arg(long)]
        work: Option<u32>,

        #[arg(long = "break")]
        break_minutes: Option<u32>,
    },
}

pub async fn run<S: KeyValueStore, C: Clock>(
    app: &mut Dayboard<S, C>,
    cmd: TimerCommand,
) -> Result<()> {
    match cmd {
        TimerCommand::Run => run_session(app).await?,
        TimerCommand::Show => show(app),
        TimerCommand::Config {
            work,
            break_minutes,
        } => {
            if let Some(m) = work {
                app.set_work_minutes(m)?;
            }
            if let Some(m) = break_minutes {
                app.set_break_minutes(m)?;
            }
            show(app);
        }
    }
    Ok(())
}

fn show<S: KeyValueStore, C: Clock>(app: &Dayboard<S, C>) {
    let t = app.timer();
    println!(
        "work {} min, break {} min ({})",
        t.work_minutes(),
        t.break_minutes(),
        t.display()
    );
}

/// Something that resolves once per countdown second.
pub(crate) trait TickSource {
    async fn tick(&mut self);
}

impl TickSource for Interval {
    async fn tick(&mut self) {
        Interval::tick(self).await;
    }
}

fn one_second_ticks() -> Interval {
    let period = Duration::from_secs(1);
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// How a foreground session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionEnd {
    /// The timer was already counting; no tick source was created.
    AlreadyRunning,
    Completed,
    /// The stop signal fired and the timer was paused.
    Interrupted,
    /// The engine stopped accepting ticks.
    Stopped,
}

async fn run_session<S: KeyValueStore, C: Clock>(app: &mut Dayboard<S, C>) -> Result<()> {
    let end = drive_session(app, one_second_ticks, tokio::signal::ctrl_c()).await?;
    tracing::debug!(?end, "session finished");
    Ok(())
}

/// Run one session, creating the tick source only when `start` asks for one.
///
/// The source and the stop future are owned by this call, so returning on
/// completion or on `stop` drops both.
pub(crate) async fn drive_session<S, C, T, F>(
    app: &mut Dayboard<S, C>,
    make_ticks: impl FnOnce() -> T,
    stop: F,
) -> Result<SessionEnd>
where
    S: KeyValueStore,
    C: Clock,
    T: TickSource,
    F: Future<Output = std::io::Result<()>>,
{
    if !app.start_timer().needs_tick_source() {
        return Ok(SessionEnd::AlreadyRunning);
    }
    println!("{}  Working...", app.timer().display());

    let mut ticks = make_ticks();
    tokio::pin!(stop);

    let end = loop {
        tokio::select! {
            _ = ticks.tick() => match app.tick_timer() {
                TimerEvent::Ticked { .. } => {
                    print!("\r{}  Working...", app.timer().display());
                    std::io::stdout().flush()?;
                }
                TimerEvent::Completed => {
                    println!("\r{}          ", app.timer().display());
                    break SessionEnd::Completed;
                }
                TimerEvent::Ignored => break SessionEnd::Stopped,
            },
            _ = &mut stop => {
                app.pause_timer();
                println!("\nPaused at {}", app.timer().display());
                tracing::debug!(remaining = app.timer().remaining_seconds(), "session interrupted");
                break SessionEnd::Interrupted;
            }
        }
        print_notifications(app);
    };
    print_notifications(app);
    Ok(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use dayboard_core::{FixedClock, MemoryStore, Settings, TimerState};
    use std::cell::Cell;
    use tokio::sync::mpsc;

    impl TickSource for mpsc::UnboundedReceiver<()> {
        async fn tick(&mut self) {
            if self.recv().await.is_none() {
                std::future::pending::<()>().await;
            }
        }
    }

    fn app(work_minutes: u32) -> Dayboard<MemoryStore, FixedClock> {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 2, 13, 15, 0, 0).unwrap());
        let mut app = Dayboard::open(MemoryStore::new(), clock, Settings::default());
        app.set_work_minutes(work_minutes).unwrap();
        app
    }

    fn never() -> std::future::Pending<std::io::Result<()>> {
        std::future::pending()
    }

    #[tokio::test(start_paused = true)]
    async fn session_runs_to_completion_on_the_interval() {
        let mut app = app(1);
        let started = Instant::now();
        let end = drive_session(&mut app, one_second_ticks, never()).await.unwrap();
        assert_eq!(end, SessionEnd::Completed);
        assert_eq!(started.elapsed(), Duration::from_secs(60));
        assert_eq!(app.timer().state(), TimerState::Idle);
        assert_eq!(app.timer().remaining_seconds(), 60);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_signal_pauses_mid_session() {
        let mut app = app(1);
        let stop = async {
            tokio::time::sleep(Duration::from_millis(2500)).await;
            Ok(())
        };
        let end = drive_session(&mut app, one_second_ticks, stop).await.unwrap();
        assert_eq!(end, SessionEnd::Interrupted);
        assert_eq!(app.timer().state(), TimerState::Paused);
        assert_eq!(app.timer().remaining_seconds(), 58);
    }

    #[tokio::test]
    async fn second_start_creates_no_tick_source() {
        let mut app = app(1);
        app.start_timer();
        app.tick_timer();

        let created = Cell::new(0);
        let make = || {
            created.set(created.get() + 1);
            mpsc::unbounded_channel::<()>().1
        };
        let end = drive_session(&mut app, make, never()).await.unwrap();
        assert_eq!(end, SessionEnd::AlreadyRunning);
        assert_eq!(created.get(), 0);
        assert_eq!(app.timer().remaining_seconds(), 59);
    }

    #[tokio::test]
    async fn tick_source_dropped_on_completion() {
        let mut app = app(1);
        let (tx, rx) = mpsc::unbounded_channel();
        for _ in 0..60 {
            tx.send(()).unwrap();
        }
        let end = drive_session(&mut app, move || rx, never()).await.unwrap();
        assert_eq!(end, SessionEnd::Completed);
        assert!(tx.is_closed());
        assert!(tx.send(()).is_err());
    }

    #[tokio::test]
    async fn tick_source_dropped_on_interrupt_and_recreated_on_resume() {
        let mut app = app(1);
        let (tx, rx) = mpsc::unbounded_channel();
        let stop = std::future::ready(Ok(()));
        let end = drive_session(&mut app, move || rx, stop).await.unwrap();
        assert_eq!(end, SessionEnd::Interrupted);
        assert!(tx.is_closed());
        assert_eq!(app.timer().state(), TimerState::Paused);

        let created = Cell::new(0);
        let (tx, rx) = mpsc::unbounded_channel();
        for _ in 0..60 {
            tx.send(()).unwrap();
        }
        let make = || {
            created.set(created.get() + 1);
            rx
        };
        let end = drive_session(&mut app, make, never()).await.unwrap();
        assert_eq!(end, SessionEnd::Completed);
        assert_eq!(created.get(), 1);
        assert!(tx.is_closed());
    }
}
