//! Item-set editing and listing.

use crate::console::Console;
use crate::state::AppState;
use anyhow::{bail, Result};
use std::io::{BufRead, Write};

/// Add an item, or change the answer of an existing one.
pub fn add_item<R: BufRead, W: Write>(
    state: &mut AppState,
    console: &mut Console<R, W>,
    item: &str,
    answer: &str,
) -> Result<()> {
    let (item, answer) = (item.trim(), answer.trim());
    if item.is_empty() || answer.is_empty() {
        bail!("item and answer must not be empty");
    }

    if state.add_item(item, answer)? {
        console.say(format!("Updated: {item} -> {answer}"))?;
    } else {
        console.say(format!("Added: {item} -> {answer}"))?;
    }
    Ok(())
}

/// Print every item sorted by name.
pub fn list_items<R: BufRead, W: Write>(state: &AppState, console: &mut Console<R, W>) -> Result<()> {
    if state.items.is_empty() {
        console.say("The item set is empty.")?;
        return Ok(());
    }

    let mut items: Vec<_> = state.items.iter().collect();
    items.sort_by(|a, b| a.id.cmp(&b.id));

    console.say(format!("{} items in {}:", items.len(), state.item_file.path().display()))?;
    for item in items {
        console.say(format!("  {}: {}", item.id, item.answer))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::tempdir;

    fn state(dir: &std::path::Path) -> AppState {
        let data_file = dir.join("set.json");
        std::fs::write(&data_file, r#"{"b": "1912", "a": "1911"}"#).unwrap();
        AppState::open(
            Config {
                data_file,
                stats_file: dir.join("stats.json"),
                ..Config::default()
            },
            None,
        )
        .unwrap()
    }

    #[test]
    fn list_is_sorted_by_name() {
        let dir = tempdir().unwrap();
        let state = state(dir.path());
        let mut console = Console::new(&b""[..], Vec::new());

        list_items(&state, &mut console).unwrap();

        let output = String::from_utf8(console.into_output()).unwrap();
        let a = output.find("a: 1911").unwrap();
        let b = output.find("b: 1912").unwrap();
        assert!(a < b);
    }

    #[test]
    fn add_reports_new_and_updated_items() {
        let dir = tempdir().unwrap();
        let mut state = state(dir.path());
        let mut console = Console::new(&b""[..], Vec::new());

        add_item(&mut state, &mut console, "c", "1919").unwrap();
        add_item(&mut state, &mut console, " a ", "1911 - 1912").unwrap();

        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("Added: c -> 1919"));
        assert!(output.contains("Updated: a -> 1911 - 1912"));
        assert_eq!(state.items.get("a"), Some("1911 - 1912"));
    }

    #[test]
    fn blank_input_is_rejected() {
        let dir = tempdir().unwrap();
        let mut state = state(dir.path());
        let mut console = Console::new(&b""[..], Vec::new());

        assert!(add_item(&mut state, &mut console, "  ", "1900").is_err());
        assert_eq!(state.items.len(), 2);
    }
}
