use dayboard_core::{Clock, Dayboard, KeyValueStore, MonthGrid, WEEKDAY_LABELS};

/// Move the cursor `offset` months from the startup month, print the grid,
/// and optionally pick a day.
pub fn run<S: KeyValueStore, C: Clock>(app: &mut Dayboard<S, C>, offset: i32, pick: Option<u32>) {
    for _ in 0..offset.unsigned_abs() {
        if offset > 0 {
            app.next_month();
        } else {
            app.prev_month();
        }
    }

    print!("{}", render_grid(&app.render_calendar()));

    if let Some(day) = pick {
        match app.select_day(day) {
            Some(date) => println!("\nUse with: --date {date}"),
            None => println!("\nNo day {day} in this month"),
        }
    }
}

/// Plain-text month view. `*` marks days with tasks, `[..]` marks today.
pub fn render_grid(grid: &MonthGrid) -> String {
    let mut s = format!("{:^34}\n", grid.title);
    for label in WEEKDAY_LABELS {
        s.push_str(&format!("{label:>4} "));
    }
    s.push('\n');

    for week in grid.rows() {
        for cell in week {
            let text = match cell {
                None => String::new(),
                Some(c) => {
                    let mark = if c.has_event { "*" } else { "" };
                    if c.today {
                        format!("[{}]{mark}", c.day)
                    } else {
                        format!("{}{mark}", c.day)
                    }
                }
            };
            s.push_str(&format!("{text:>4} "));
        }
        s.push('\n');
    }
    s
}
