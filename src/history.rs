//! Request history
//!
//! Newest-first log of past send attempts, persisted as a JSON array. Every
//! mutation rewrites the file; loading never fails, a missing or corrupt file
//! simply yields an empty history.

use crate::types::{DisplayedResponse, DraftRequest, HistoryEntry};
use color_eyre::Result;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,

    /// Backing file; `None` keeps history in memory only
    path: Option<PathBuf>,

    /// Trim to this many entries on append
    max_entries: Option<usize>,
}

impl HistoryStore {
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Read history from `path`, falling back to empty on any problem
    pub fn load(path: PathBuf, max_entries: Option<usize>) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => decode(&contents, &path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!("Could not read history {}: {e}", path.display());
                Vec::new()
            }
        };
        tracing::info!("Loaded {} history entries", entries.len());

        Self {
            entries,
            path: Some(path),
            max_entries,
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, idx: usize) -> Option<&HistoryEntry> {
        self.entries.get(idx)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepend an entry and persist. The in-memory log is updated even if
    /// the write fails.
    pub fn append(&mut self, entry: HistoryEntry) -> Result<()> {
        self.entries.insert(0, entry);
        if let Some(max) = self.max_entries {
            self.entries.truncate(max);
        }
        self.persist()
    }

    /// Drop every entry and persist the empty log
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.persist()
    }

    /// Project an entry back into a draft and a response view. Pure: no
    /// network call, history unchanged.
    pub fn select(&self, idx: usize) -> Option<(DraftRequest, DisplayedResponse)> {
        self.get(idx)
            .map(|entry| (entry.request.clone(), entry.to_displayed()))
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(&self.entries)?;
        fs::write(path, json)?;
        tracing::debug!("Saved {} history entries", self.entries.len());
        Ok(())
    }
}

fn decode(contents: &str, path: &Path) -> Vec<HistoryEntry> {
    if contents.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<HistoryEntry>>(contents) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Ignoring corrupt history {}: {e}", path.display());
            Vec::new()
        }
    }
}
