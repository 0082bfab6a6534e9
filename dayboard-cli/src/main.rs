use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dayboard_core::{Clock, Dayboard, KeyValueStore, SystemClock};
use tracing_subscriber::EnvFilter;

mod calendar_cmd;
mod config;
mod reminders_cmd;
mod state;
mod tasks_cmd;
mod timer_cmd;

#[derive(Parser, Debug)]
#[command(
    name = "dayboard",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("DAYBOARD_BUILD_SHA"), ")"),
    about = "Tasks, reminders, a pomodoro timer and a month calendar"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage tasks
    Task {
        #[command(subcommand)]
        command: tasks_cmd::TaskCommand,
    },

    /// Manage reminders
    Reminder {
        #[command(subcommand)]
        command: reminders_cmd::RemindersCommand,
    },

    /// Pomodoro timer
    Timer {
        #[command(subcommand)]
        command: timer_cmd::TimerCommand,
    },

    /// Show the month calendar (starts at February 2026)
    Calendar {
        /// Months to move from the starting month (negative goes back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,

        /// Pick a day to get a pre-filled --date value
        #[arg(long)]
        pick: Option<u32>,
    },

    /// Print a greeting for the current local time
    Greet,

    /// Configuration file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,

    /// Print the config file path
    Path,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Print and clear every queued notification.
pub(crate) fn print_notifications<S: KeyValueStore, C: Clock>(app: &mut Dayboard<S, C>) {
    for n in app.notifications_mut().drain() {
        println!("{}", n.message);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if let Command::Config { command } = &cli.command {
        match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Path => println!("{}", config::config_path()?.display()),
        }
        return Ok(());
    }

    let settings = config::load_config()?
        .settings()
        .context("load calendar settings")?;
    let store = state::open_store()?;
    let mut app = Dayboard::open(store, SystemClock, settings);

    match cli.command {
        Command::Task { command } => tasks_cmd::run(&mut app, command)?,
        Command::Reminder { command } => reminders_cmd::run(&mut app, command)?,
        Command::Timer { command } => timer_cmd::run(&mut app, command).await?,
        Command::Calendar { offset, pick } => calendar_cmd::run(&mut app, offset, pick),
        Command::Greet => println!("{}!", app.greeting()),
        Command::Config { .. } => {}
    }

    print_notifications(&mut app);
    Ok(())
}
