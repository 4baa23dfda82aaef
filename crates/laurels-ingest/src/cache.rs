//! On-disk cache of fetched year pages.
//!
//! One JSON object per award, mapping the year (as a string key) to the raw
//! page HTML: `{"2006": "<!DOCTYPE html>…", "2007": …}`. Pages never expire;
//! delete the file to refetch.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::IngestError;

#[derive(Debug)]
pub struct PageCache {
    path: PathBuf,
    pages: BTreeMap<String, String>,
}

impl PageCache {
    /// Load the cache at `path`. A missing or empty file is an empty cache.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, IngestError> {
        let path = path.into();
        let pages = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|source| IngestError::Cache {
                    path: path.clone(),
                    source,
                })?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %path.display(), pages = pages.len(), "opened page cache");
        Ok(Self { path, pages })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, year: i32) -> Option<&str> {
        self.pages.get(&year.to_string()).map(String::as_str)
    }

    pub fn contains(&self, year: i32) -> bool {
        self.pages.contains_key(&year.to_string())
    }

    pub fn insert(&mut self, year: i32, page: String) {
        self.pages.insert(year.to_string(), page);
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Write the cache back to its file, creating parent directories.
    pub fn save(&self) -> Result<(), IngestError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&self.pages)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
