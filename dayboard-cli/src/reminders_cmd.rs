use anyhow::{Result, bail};
use clap::Subcommand;
use dayboard_core::{Category, Clock, Dayboard, KeyValueStore, NewEntry};

#[derive(Subcommand, Debug)]
pub enum RemindersCommand {
    /// Add a reminder
    Add {
        name: String,

        #[arg(long)]
        category: Option<Category>,

        /// Reminder time, e.g. 2026-02-13T09:00
        #[arg(long)]
        date: Option<String>,
    },

    /// List reminders with their positions
    List,

    /// Delete a reminder by position (from `list`) or by --id
    Rm {
        index: Option<usize>,

        #[arg(long, conflicts_with = "index")]
        id: Option<u64>,
    },
}

pub fn run<S: KeyValueStore, C: Clock>(
    app: &mut Dayboard<S, C>,
    cmd: RemindersCommand,
) -> Result<()> {
    match cmd {
        RemindersCommand::Add {
            name,
            category,
            date,
        } => {
            let draft = NewEntry {
                name,
                category,
                date,
            };
            if let Err(e) = app.add_reminder(draft) {
                if !e.is_validation() {
                    return Err(e.into());
                }
            }
        }
        RemindersCommand::List => list(app),
        RemindersCommand::Rm { index, id } => {
            let removed = match (index, id) {
                (_, Some(id)) => app.delete_reminder(id)?,
                (Some(index), None) => app.delete_reminder_at(index)?,
                (None, None) => bail!("pass a position or --id <ID>"),
            };
            match removed {
                Some(r) => println!("Removed reminder \"{}\"", r.name),
                None => println!("No such reminder"),
            }
        }
    }
    Ok(())
}

fn list<S: KeyValueStore, C: Clock>(app: &Dayboard<S, C>) {
    let reminders = app.reminders();
    if reminders.is_empty() {
        println!("No reminders.");
        return;
    }
    for (i, r) in reminders.iter().enumerate() {
        println!("{i:>3}  🔔 {}  ({})", r.name, app.reminder_label(r));
    }
}
