//! Timeline Drill: memorize historical dates from the terminal.
//!
//! The binary is a thin wrapper around [`run`]; the modules are public so the
//! menu and sessions can be driven from tests with scripted input.

pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod menu;
pub mod state;
pub mod storage;

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::console::Console;
use crate::state::AppState;

const DEFAULT_LOG_FILTER: &str = "timeline_drill=warn,timeline_core=warn";

/// Parse the command line and run the menu or the requested command.
pub fn run() -> Result<()> {
    let dotenv = dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with quiz output.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Some(path) = dotenv {
        tracing::info!(path = %path.display(), "loaded .env");
    }

    let cli = Cli::parse();
    let config = Config::load(&cli)?;
    let mut state = AppState::open(config, cli.seed).context("failed to open the item set")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    dispatch(&mut state, &mut console, cli.command)
}

/// Run one subcommand, or the interactive menu when there is none.
pub fn dispatch<R: io::BufRead, W: io::Write>(
    state: &mut AppState,
    console: &mut Console<R, W>,
    command: Option<Commands>,
) -> Result<()> {
    commands::report_stats_problem(state, console)?;

    match command {
        None => menu::run(state, console, std::path::Path::new(".")),
        Some(Commands::Study) => {
            let count = state.config.session.default_questions;
            let kind = state.config.session.question_kind;
            commands::run_session(state, console, count, kind).map(|_| ())
        }
        Some(Commands::List) => commands::list_items(state, console),
        Some(Commands::Add { item, answer }) => commands::add_item(state, console, &item, &answer),
        Some(Commands::Stats) => Ok(commands::show_overview(state, console)?),
    }
}
