//! Interactive main menu.

use crate::commands::{self, study};
use crate::console::Console;
use crate::state::AppState;
use anyhow::Result;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use timeline_core::QuestionKind;

const RULE: &str = "==================================================";

/// Run the menu until the learner quits or input ends.
///
/// `dir` is where item-set files are looked for when switching sets.
pub fn run<R: BufRead, W: Write>(state: &mut AppState, console: &mut Console<R, W>, dir: &Path) -> Result<()> {
    loop {
        print_header(state, console)?;

        let Some(choice) = console.ask("\nChoose (0-6): ")? else {
            break;
        };

        let kind = match choice.as_str() {
            "1" => Some(QuestionKind::MultipleChoice),
            "2" => Some(QuestionKind::FillBlank),
            "3" => Some(QuestionKind::Random),
            _ => None,
        };
        if let Some(kind) = kind {
            let Some(count) = ask_count(state, console)? else {
                break;
            };
            study::run_session(state, console, count, kind)?;
            continue;
        }

        let keep_going = match choice.as_str() {
            "4" => add_item(state, console)?,
            "5" => {
                console.say("")?;
                commands::list_items(state, console)?;
                console.say("")?;
                console.pause()?
            }
            "6" => switch_item_set(state, console, dir)?,
            "0" => {
                console.say("")?;
                console.say("Goodbye!")?;
                false
            }
            _ => {
                console.say("")?;
                console.say("Invalid choice, please try again.")?;
                console.pause()?
            }
        };
        if !keep_going {
            break;
        }
    }
    Ok(())
}

fn print_header<R: BufRead, W: Write>(state: &AppState, console: &mut Console<R, W>) -> Result<()> {
    console.say("")?;
    console.say(RULE)?;
    console.say(format!("Timeline Drill v{}", env!("CARGO_PKG_VERSION")))?;
    console.say(RULE)?;
    commands::show_overview(state, console)?;
    console.say("")?;
    console.say("Main menu:")?;
    console.say("1. Study (multiple choice)")?;
    console.say("2. Study (fill in the blank)")?;
    console.say("3. Study (mixed)")?;
    console.say("4. Add an item")?;
    console.say("5. List all items")?;
    console.say("6. Switch item-set file")?;
    console.say("0. Quit")?;
    Ok(())
}

/// Ask how many questions to study. Blank input takes the configured default.
fn ask_count<R: BufRead, W: Write>(state: &AppState, console: &mut Console<R, W>) -> Result<Option<usize>> {
    let default = state.config.session.default_questions;
    loop {
        let Some(input) = console.ask(&format!("Number of questions [{default}]: "))? else {
            return Ok(None);
        };
        if input.is_empty() {
            return Ok(Some(default));
        }
        match input.parse::<usize>() {
            Ok(count) => return Ok(Some(state.config.clamp_questions(count))),
            Err(_) => console.say("Please enter a whole number.")?,
        }
    }
}

fn add_item<R: BufRead, W: Write>(state: &mut AppState, console: &mut Console<R, W>) -> Result<bool> {
    console.say("")?;
    console.say("Add an item")?;
    console.say(RULE)?;

    let Some(item) = console.ask("Item: ")? else {
        return Ok(false);
    };
    if item.is_empty() {
        console.say("The item must not be empty!")?;
        return Ok(console.pause()?);
    }
    let Some(answer) = console.ask("Date: ")? else {
        return Ok(false);
    };
    if answer.is_empty() {
        console.say("The date must not be empty!")?;
        return Ok(console.pause()?);
    }

    console.say("")?;
    if let Err(err) = commands::add_item(state, console, &item, &answer) {
        tracing::error!(error = %err, "failed to add item");
        console.say(format!("Could not add the item: {err}"))?;
    }
    console.say("")?;
    Ok(console.pause()?)
}

fn switch_item_set<R: BufRead, W: Write>(state: &mut AppState, console: &mut Console<R, W>, dir: &Path) -> Result<bool> {
    let Some(input) = console.ask("\nPath of the item-set file (blank to list JSON files here): ")? else {
        return Ok(false);
    };

    let path = if input.is_empty() {
        let files = json_files(dir)?;
        if files.is_empty() {
            console.say("")?;
            console.say("No JSON item-set files found.")?;
            return Ok(console.pause()?);
        }

        console.say("")?;
        console.say("Item-set files:")?;
        for (i, file) in files.iter().enumerate() {
            console.say(format!("{}. {file}", i + 1))?;
        }

        let Some(choice) = console.ask("\nFile number: ")? else {
            return Ok(false);
        };
        match choice.parse::<usize>() {
            Ok(n) if (1..=files.len()).contains(&n) => dir.join(&files[n - 1]),
            Ok(_) => {
                console.say("")?;
                console.say("Invalid choice!")?;
                return Ok(console.pause()?);
            }
            Err(_) => {
                console.say("")?;
                console.say("Please enter a valid number!")?;
                return Ok(console.pause()?);
            }
        }
    } else {
        PathBuf::from(input)
    };

    console.say("")?;
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    if !path.is_file() || !is_json {
        console.say(format!("Not an existing JSON file: {}", path.display()))?;
    } else if path == state.item_file.path() {
        console.say(format!("Already studying {}", path.display()))?;
    } else {
        match state.switch_data_file(path) {
            Ok(()) => {
                console.say(format!("Switched to {}", state.item_file.path().display()))?;
                commands::report_stats_problem(state, console)?;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to switch item set");
                console.say(format!("Could not load the item set: {err}"))?;
            }
        }
    }
    Ok(console.pause()?)
}

/// Names of `*.json` files in `dir`, sorted.
fn json_files(dir: &Path) -> Result<Vec<String>> {
    let mut files: Vec<String> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".json"))
        .collect();
    files.sort();
    Ok(files)
}
