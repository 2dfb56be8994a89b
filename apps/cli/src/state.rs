//! Current item set and its review engine.

use crate::config::Config;
use crate::storage::{self, ItemFile, JsonStatStore};
use std::path::{Path, PathBuf};
use timeline_core::{local_now, ItemSet, ReviewSystem, StudyOverview};

pub struct AppState {
    pub config: Config,
    pub item_file: ItemFile,
    pub items: ItemSet,
    pub system: ReviewSystem<JsonStatStore>,
    seed: Option<u64>,
}

impl AppState {
    /// Load the configured item set and its statistics.
    pub fn open(config: Config, seed: Option<u64>) -> storage::Result<Self> {
        let item_file = ItemFile::new(&config.data_file);
        let items = item_file.load_or_seed()?;
        let system = open_system(&config, item_file.path(), seed)?;

        tracing::info!(
            data = %item_file.path().display(),
            items = items.len(),
            "item set ready"
        );

        Ok(Self {
            config,
            item_file,
            items,
            system,
            seed,
        })
    }

    /// Study another existing item-set file. The current set stays active if
    /// the new one cannot be loaded.
    pub fn switch_data_file(&mut self, path: PathBuf) -> storage::Result<()> {
        let item_file = ItemFile::new(path);
        let items = item_file.load()?;
        let system = open_system(&self.config, item_file.path(), self.seed)?;

        tracing::info!(data = %item_file.path().display(), items = items.len(), "switched item set");
        self.config.data_file = item_file.path().to_path_buf();
        self.item_file = item_file;
        self.items = items;
        self.system = system;
        Ok(())
    }

    /// Add an item or replace its answer, then save the item set.
    pub fn add_item(&mut self, id: &str, answer: &str) -> storage::Result<bool> {
        let replaced = self.items.contains(id);
        self.items.insert(id, answer);
        self.item_file.save(&self.items)?;
        Ok(replaced)
    }

    /// Why the statistics were opened empty, if the stats file was unreadable.
    pub fn stats_problem(&self) -> Option<&str> {
        self.system.store().load_problem()
    }

    pub fn overview(&self) -> StudyOverview {
        StudyOverview::compute(&self.items, self.system.store(), local_now())
    }
}

fn open_system(
    config: &Config,
    data_file: &Path,
    seed: Option<u64>,
) -> storage::Result<ReviewSystem<JsonStatStore>> {
    let store = JsonStatStore::open(&config.stats_file, JsonStatStore::source_key_for(data_file))?;
    let sm2 = config.scheduler.clone();
    Ok(match seed {
        Some(seed) => ReviewSystem::with_seed(store, sm2, seed),
        None => ReviewSystem::new(store, sm2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeline_core::StatStore;
    use tempfile::tempdir;

    fn config_in(dir: &Path) -> Config {
        Config {
            data_file: dir.join("history_events.json"),
            stats_file: dir.join("user_stats.json"),
            ..Config::default()
        }
    }

    #[test]
    fn open_seeds_missing_files() {
        let dir = tempdir().unwrap();
        let state = AppState::open(config_in(dir.path()), Some(1)).unwrap();

        assert_eq!(state.items, storage::sample_items());
        assert!(dir.path().join("user_stats.json").exists());
        assert_eq!(state.overview().studied_items, 0);
    }

    #[test]
    fn add_item_persists_and_reports_replacement() {
        let dir = tempdir().unwrap();
        let mut state = AppState::open(config_in(dir.path()), Some(1)).unwrap();

        assert!(!state.add_item("Xinhai Revolution", "1911").unwrap());
        assert!(state.add_item("Xinhai Revolution", "1911 - 1912").unwrap());

        let reloaded = ItemFile::new(dir.path().join("history_events.json")).load().unwrap();
        assert_eq!(reloaded.get("Xinhai Revolution"), Some("1911 - 1912"));
    }

    #[test]
    fn switching_sets_keeps_statistics_apart() {
        let dir = tempdir().unwrap();
        let mut state = AppState::open(config_in(dir.path()), Some(1)).unwrap();
        state.system.record_attempt("Long March", true, 3.0).unwrap();

        let other = dir.path().join("ancient.json");
        std::fs::write(&other, r#"{"Qin unification": "221 BC"}"#).unwrap();
        state.switch_data_file(other.clone()).unwrap();

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.config.data_file, other);
        assert!(state.system.store().all().is_empty());
    }

    #[test]
    fn truncated_stats_file_does_not_block_study() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("user_stats.json"),
            r#"{"history_events.json": {"a": {"total_att"#,
        )
        .unwrap();

        let mut state = AppState::open(config_in(dir.path()), Some(1)).unwrap();

        assert!(state.stats_problem().is_some());
        assert_eq!(state.overview().studied_items, 0);
        state.system.record_attempt("Long March", true, 3.0).unwrap();
        assert!(state.stats_problem().is_none());
        assert!(dir.path().join("user_stats.json.bak").exists());
    }

    #[test]
    fn failed_switch_keeps_current_set() {
        let dir = tempdir().unwrap();
        let mut state = AppState::open(config_in(dir.path()), Some(1)).unwrap();
        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "[]").unwrap();

        assert!(state.switch_data_file(broken).is_err());
        assert!(state.switch_data_file(dir.path().join("absent.json")).is_err());
        assert_eq!(state.items, storage::sample_items());
    }
}
