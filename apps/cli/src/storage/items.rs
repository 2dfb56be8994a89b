//! Item-set files.

use super::Result;
use std::fs;
use std::path::{Path, PathBuf};
use timeline_core::{parser, ItemSet};

/// An item-set document on disk.
#[derive(Debug, Clone)]
pub struct ItemFile {
    path: PathBuf,
}

impl ItemFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the item set, writing the sample set first if the file is missing.
    pub fn load_or_seed(&self) -> Result<ItemSet> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "item file missing, writing sample set");
            let items = sample_items();
            self.save(&items)?;
            return Ok(items);
        }
        self.load()
    }

    pub fn load(&self) -> Result<ItemSet> {
        let content = fs::read_to_string(&self.path)?;
        let items = parser::parse(&content)?;
        tracing::debug!(path = %self.path.display(), count = items.len(), "loaded items");
        Ok(items)
    }

    pub fn save(&self, items: &ItemSet) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, parser::to_json(items))?;
        tracing::debug!(path = %self.path.display(), count = items.len(), "saved items");
        Ok(())
    }
}

/// Built-in starter set of modern Chinese history dates.
pub fn sample_items() -> ItemSet {
    [
        ("First Opium War", "1840 - 1842"),
        ("Taiping Rebellion", "1851 - 1864"),
        ("Second Opium War", "1856 - 1860"),
        ("First Sino-Japanese War", "1894 - 1895"),
        ("Hundred Days' Reform", "1898"),
        ("Wuchang Uprising", "1911"),
        ("Founding of the Republic of China and abdication of the Qing emperor", "1912"),
        ("May Fourth Movement", "1919"),
        ("First National Congress of the Chinese Communist Party", "1921"),
        ("First Kuomintang National Congress and first United Front", "1924"),
        ("Nanchang Uprising and Autumn Harvest Uprising", "1927"),
        ("Mukden Incident", "1931"),
        ("Long March", "1934 - 1936"),
        ("Marco Polo Bridge Incident and start of full-scale war", "1937"),
        ("Victory in the War of Resistance", "1945"),
        ("Outbreak of full-scale civil war", "1946"),
        ("Founding of the People's Republic of China", "1949"),
    ]
    .into_iter()
    .collect()
}
