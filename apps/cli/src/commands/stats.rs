//! Progress overview.

use crate::console::Console;
use crate::state::AppState;
use std::io::{self, BufRead, Write};

pub fn show_overview<R: BufRead, W: Write>(state: &AppState, console: &mut Console<R, W>) -> io::Result<()> {
    let overview = state.overview();

    console.say(format!("Item set: {}", state.item_file.path().display()))?;
    console.say(format!(
        "Studied: {}/{} ({:.1}%)",
        overview.studied_items,
        overview.total_items,
        overview.studied_ratio() * 100.0
    ))?;
    match overview.accuracy {
        Some(accuracy) => console.say(format!("Accuracy: {:.1}%", accuracy * 100.0))?,
        None => console.say("Accuracy: no attempts yet")?,
    }
    console.say(format!("Due today: {}", overview.due_today))
}

/// Tell the learner their statistics could not be read, if that happened.
pub fn report_stats_problem<R: BufRead, W: Write>(state: &AppState, console: &mut Console<R, W>) -> io::Result<()> {
    let Some(problem) = state.stats_problem() else {
        return Ok(());
    };
    console.say(format!(
        "Could not read statistics from {}: {problem}",
        state.config.stats_file.display()
    ))?;
    console.say(format!(
        "Starting with empty statistics; the old file is copied to {} before it is replaced.",
        state.system.store().backup_path().display()
    ))
}
