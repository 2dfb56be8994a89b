//! JSON stat store.
//!
//! One stats file serves every item-set file. Its top level maps the item-set
//! file name to that set's records:
//!
//! ```json
//! { "history_events.json": { "Long March": { "total_attempts": 3, ... } } }
//! ```
//!
//! Every `put` rewrites the whole file. There is no temp-file swap, so a
//! crash mid-write can leave it truncated. A file that cannot be read as
//! JSON is reported and treated as empty, and is copied to a `.bak` file
//! before the first save replaces it.

use super::{Result, StorageError};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use timeline_core::{ReviewRecord, StatMap, StatStore};

/// Records of one item-set file, persisted in a shared JSON stats file.
#[derive(Debug)]
pub struct JsonStatStore {
    path: PathBuf,
    source_key: String,
    records: StatMap,
    /// Entries that could not be read as records; written back as they were.
    unreadable: Map<String, Value>,
    /// Why the file was opened empty, if it could not be read.
    load_problem: Option<String>,
}

impl JsonStatStore {
    /// Open the records stored under `source_key`, creating an empty stats
    /// file if there is none.
    pub fn open<P: Into<PathBuf>>(path: P, source_key: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let source_key = source_key.into();

        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, "{}")?;
            tracing::info!(path = %path.display(), "created stats file");
        }

        let mut load_problem = None;
        let entries = match read_sources(&path) {
            Ok(mut sources) => match sources.remove(&source_key) {
                Some(Value::Object(entries)) => entries,
                Some(_) => {
                    load_problem = Some(format!("stats for {source_key} are not an object"));
                    Map::new()
                }
                None => Map::new(),
            },
            Err(StorageError::Io(err)) => return Err(StorageError::Io(err)),
            Err(err) => {
                load_problem = Some(err.to_string());
                Map::new()
            }
        };
        if let Some(problem) = &load_problem {
            tracing::error!(path = %path.display(), %problem, "stats file unreadable, starting empty");
        }

        let mut records = StatMap::new();
        let mut unreadable = Map::new();
        for (id, value) in entries {
            match serde_json::from_value::<ReviewRecord>(value.clone()) {
                Ok(record) => {
                    records.insert(id, record);
                }
                Err(err) => {
                    tracing::warn!(item = %id, error = %err, "keeping unreadable review record aside");
                    unreadable.insert(id, value);
                }
            }
        }

        tracing::debug!(
            path = %path.display(),
            source = %source_key,
            records = records.len(),
            "opened stats"
        );

        Ok(Self {
            path,
            source_key,
            records,
            unreadable,
            load_problem,
        })
    }

    /// Stats key for an item-set file: its file name.
    pub fn source_key_for(data_file: &Path) -> String {
        data_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| data_file.to_string_lossy().into_owned())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source_key(&self) -> &str {
        &self.source_key
    }

    /// Set when the stats file could not be read and the store started empty.
    pub fn load_problem(&self) -> Option<&str> {
        self.load_problem.as_deref()
    }

    /// Where an unreadable stats file is copied before it is replaced.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".bak");
        self.path.with_file_name(name)
    }

    fn save(&mut self) -> Result<()> {
        let mut sources = if self.load_problem.is_some() {
            let backup = self.backup_path();
            fs::copy(&self.path, &backup)?;
            tracing::warn!(backup = %backup.display(), "backed up unreadable stats file");
            match read_sources(&self.path) {
                Ok(sources) => sources,
                Err(StorageError::Io(err)) => return Err(StorageError::Io(err)),
                Err(_) => Map::new(),
            }
        } else if self.path.exists() {
            read_sources(&self.path)?
        } else {
            Map::new()
        };

        let mut entries = self.unreadable.clone();
        let sorted: BTreeMap<_, _> = self.records.iter().collect();
        for (id, record) in sorted {
            entries.insert(id.clone(), serde_json::to_value(record)?);
        }
        sources.insert(self.source_key.clone(), Value::Object(entries));

        fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(sources))?)?;
        self.load_problem = None;
        tracing::debug!(path = %self.path.display(), source = %self.source_key, "saved stats");
        Ok(())
    }
}

impl StatStore for JsonStatStore {
    type Error = StorageError;

    fn get(&self, id: &str) -> Option<ReviewRecord> {
        self.records.get(id).cloned()
    }

    fn put(&mut self, id: &str, record: ReviewRecord) -> Result<()> {
        self.unreadable.remove(id);
        self.records.insert(id.to_string(), record);
        self.save()
    }

    fn all(&self) -> &StatMap {
        &self.records
    }
}

fn read_sources(path: &Path) -> Result<Map<String, Value>> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(&content)? {
        Value::Object(sources) => Ok(sources),
        _ => Err(StorageError::InvalidData(format!(
            "{} does not hold a JSON object",
            path.display()
        ))),
    }
}
