//! Command-line definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use timeline_core::QuestionKind;

/// Memorize historical dates with spaced repetition
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Questions per study session
    #[arg(short = 'q', long)]
    pub questions: Option<usize>,

    /// Question type: multiple_choice, fill_blank or random
    #[arg(short = 't', long = "type", value_parser = parse_kind)]
    pub kind: Option<QuestionKind>,

    /// Item-set file to study
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Statistics file
    #[arg(short, long)]
    pub stats: Option<PathBuf>,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for question order, for reproducible sessions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run a single command instead of the interactive menu
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start a study session
    Study,

    /// List every item in the current set
    List,

    /// Add an item, or change the answer of an existing one
    Add {
        /// The event to remember
        item: String,

        /// When it happened
        answer: String,
    },

    /// Show study progress
    Stats,
}

fn parse_kind(s: &str) -> Result<QuestionKind, String> {
    QuestionKind::parse(s)
        .ok_or_else(|| format!("unknown question type {s:?}; expected multiple_choice, fill_blank or random"))
}
