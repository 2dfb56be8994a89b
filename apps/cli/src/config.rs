//! Application configuration.
//!
//! Values are layered with priority: command line > environment > config.toml
//! > defaults. A `.env` file, if any, is loaded into the environment by the
//! entry point before this runs.

use crate::cli::Cli;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use timeline_core::{QuestionKind, Sm2};

pub const DATA_FILE_ENV: &str = "TIMELINE_DATA_FILE";
pub const STATS_FILE_ENV: &str = "TIMELINE_STATS_FILE";

const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_file: PathBuf,
    pub stats_file: PathBuf,
    pub session: SessionConfig,
    pub scheduler: Sm2,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("history_events.json"),
            stats_file: PathBuf::from("user_stats.json"),
            session: SessionConfig::default(),
            scheduler: Sm2::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub default_questions: usize,
    pub max_questions: usize,
    /// How many due items a question is drawn from.
    pub due_pool_size: usize,
    pub question_kind: QuestionKind,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_questions: 10,
            max_questions: 50,
            due_pool_size: 10,
            question_kind: QuestionKind::Random,
        }
    }
}

impl Config {
    /// Resolve the configuration for a command-line invocation.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => {
                tracing::info!("no config file, using defaults");
                Self::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(DATA_FILE_ENV).filter(|v| !v.is_empty()) {
            tracing::info!(env = DATA_FILE_ENV, %path, "data file from environment");
            self.data_file = PathBuf::from(path);
        }
        if let Some(path) = lookup(STATS_FILE_ENV).filter(|v| !v.is_empty()) {
            tracing::info!(env = STATS_FILE_ENV, %path, "stats file from environment");
            self.stats_file = PathBuf::from(path);
        }
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(path) = &cli.data {
            self.data_file = path.clone();
        }
        if let Some(path) = &cli.stats {
            self.stats_file = path.clone();
        }
        if let Some(count) = cli.questions {
            self.session.default_questions = count;
        }
        if let Some(kind) = cli.kind {
            self.session.question_kind = kind;
        }
    }

    fn validate(&mut self) -> Result<()> {
        if self.session.max_questions == 0 {
            bail!("session.max_questions must be at least 1");
        }
        if self.session.due_pool_size == 0 {
            bail!("session.due_pool_size must be at least 1");
        }
        if !(self.scheduler.minimum_ease > 0.0 && self.scheduler.initial_ease >= self.scheduler.minimum_ease) {
            bail!("scheduler.initial_ease must be at least scheduler.minimum_ease, which must be positive");
        }
        if self.scheduler.initial_interval <= 0.0 {
            bail!("scheduler.initial_interval must be positive");
        }
        self.session.default_questions = self.clamp_questions(self.session.default_questions);
        Ok(())
    }

    /// Clamp a requested question count to `1..=max_questions`.
    pub fn clamp_questions(&self, requested: usize) -> usize {
        requested.clamp(1, self.session.max_questions.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("timeline-drill").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.data_file, PathBuf::from("history_events.json"));
        assert_eq!(config.stats_file, PathBuf::from("user_stats.json"));
        assert_eq!(config.session.default_questions, 10);
        assert_eq!(config.session.max_questions, 50);
        assert_eq!(config.session.due_pool_size, 10);
        assert_eq!(config.scheduler, Sm2::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            data_file = "decks/dynasties.json"

            [session]
            max_questions = 20
            question_kind = "fill_blank"

            [scheduler]
            minimum_ease = 1.5
            "#,
        )
        .unwrap();

        assert_eq!(config.data_file, PathBuf::from("decks/dynasties.json"));
        assert_eq!(config.stats_file, PathBuf::from("user_stats.json"));
        assert_eq!(config.session.max_questions, 20);
        assert_eq!(config.session.default_questions, 10);
        assert_eq!(config.session.question_kind, QuestionKind::FillBlank);
        assert_eq!(config.scheduler.minimum_ease, 1.5);
        assert_eq!(config.scheduler.initial_ease, 2.5);
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(Config::from_toml_str("session = 3").is_err());
    }

    #[test]
    fn environment_overrides_file_and_cli_overrides_environment() {
        let mut config = Config::from_toml_str(r#"data_file = "from_file.json""#).unwrap();
        let env: HashMap<&str, &str> = [
            (DATA_FILE_ENV, "from_env.json"),
            (STATS_FILE_ENV, "env_stats.json"),
        ]
        .into();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.data_file, PathBuf::from("from_env.json"));

        config.apply_cli(&cli(&["--data", "from_cli.json"]));
        assert_eq!(config.data_file, PathBuf::from("from_cli.json"));
        assert_eq!(config.stats_file, PathBuf::from("env_stats.json"));
    }

    #[test]
    fn empty_environment_values_are_ignored() {
        let mut config = Config::default();
        config.apply_env(|_| Some(String::new()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn question_count_is_clamped() {
        let config = Config::default();
        assert_eq!(config.clamp_questions(0), 1);
        assert_eq!(config.clamp_questions(7), 7);
        assert_eq!(config.clamp_questions(500), 50);
    }

    #[test]
    fn validate_clamps_requested_default() {
        let mut config = Config::default();
        config.apply_cli(&cli(&["-q", "99"]));
        config.validate().unwrap();
        assert_eq!(config.session.default_questions, 50);
    }

    #[test]
    fn validate_rejects_unusable_scheduler() {
        let mut config = Config::from_toml_str("[scheduler]\ninitial_ease = 1.0").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn explicit_missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::from_file(&dir.path().join("absent.toml")).is_err());
    }
}
