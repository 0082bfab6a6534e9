use anyhow::Result;
use clap::Subcommand;
use dayboard_core::{Category, Clock, Dayboard, KeyValueStore, NewEntry, TaskFilter};

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Add a task
    Add {
        name: String,

        /// Work, Personal or Other (default: Work)
        #[arg(long)]
        category: Option<Category>,

        /// Scheduled time, e.g. 2026-02-13T09:00
        #[arg(long)]
        date: Option<String>,
    },

    /// List tasks, newest first
    List {
        /// All, Work, Personal or Other
        #[arg(long, default_value = "All")]
        category: TaskFilter,
    },

    /// Complete a task (removes it)
    Done { id: u64 },

    /// Delete a task
    Rm { id: u64 },
}

pub fn run<S: KeyValueStore, C: Clock>(app: &mut Dayboard<S, C>, cmd: TaskCommand) -> Result<()> {
    match cmd {
        TaskCommand::Add {
            name,
            category,
            date,
        } => {
            let draft = NewEntry {
                name,
                category,
                date,
            };
            // Validation failures are already queued as notifications.
            if let Err(e) = app.add_task(draft) {
                if !e.is_validation() {
                    return Err(e.into());
                }
            }
        }
        TaskCommand::List { category } => list(app, category),
        TaskCommand::Done { id } => {
            if app.complete_task(id)?.is_none() {
                println!("No task with id {id}");
            }
        }
        TaskCommand::Rm { id } => {
            if app.delete_task(id)?.is_none() {
                println!("No task with id {id}");
            }
        }
    }
    Ok(())
}

fn list<S: KeyValueStore, C: Clock>(app: &Dayboard<S, C>, filter: TaskFilter) {
    let tasks = app.list_tasks(filter);
    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }
    for t in &tasks {
        let when = t
            .date
            .as_deref()
            .map(|d| format!(" @ {d}"))
            .unwrap_or_default();
        println!(
            "{:>14}  [{:<8}] {}{}  ({})",
            t.id,
            t.category,
            t.name,
            when,
            app.time_ago(t)
        );
    }
}
