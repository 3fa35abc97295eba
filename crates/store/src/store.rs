use crate::entry::FileEntry;
use crate::error::{Result, StoreError};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Persistent mapping from relative path to [`FileEntry`].
///
/// The whole mapping is loaded at the start of a run, mutated in memory, and
/// written back wholesale by [`RecordStore::save`]. Keys are relative paths
/// with `/` separators. A `BTreeMap` keeps the serialized file stably
/// ordered, so an unchanged store saves byte-identically.
#[derive(Debug)]
pub struct RecordStore {
    entries: BTreeMap<String, FileEntry>,
    path: PathBuf,
}

impl RecordStore {
    /// Load the store from `path`, or start empty if the file does not exist.
    ///
    /// A file that exists but does not parse is fatal: treating it as empty
    /// would silently regenerate every `external_id`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| StoreError::CorruptState {
                    path: path.clone(),
                    source,
                })?
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };

        log::debug!("Loaded {} entries from {}", entries.len(), path.display());
        Ok(Self { entries, path })
    }

    /// True if `rel_path` is new or its stored fingerprint differs.
    pub fn has_changed(&self, rel_path: &str, fingerprint: &str) -> bool {
        match self.entries.get(rel_path) {
            Some(entry) => entry.hash != fingerprint,
            None => true,
        }
    }

    /// Insert or update the entry for `rel_path`. Returns `true` when the
    /// entry was newly created.
    ///
    /// This is the sole mutation path for entries. An existing key keeps its
    /// `external_id`; only a first sighting mints a new one.
    pub fn upsert(&mut self, rel_path: &str, fingerprint: &str, summary: &str) -> bool {
        let (external_id, created) = match self.entries.get(rel_path) {
            Some(existing) => (existing.external_id.clone(), false),
            None => (Uuid::new_v4().to_string(), true),
        };

        self.entries.insert(
            rel_path.to_string(),
            FileEntry {
                hash: fingerprint.to_string(),
                external_id,
                high_level_documentation: summary.to_string(),
            },
        );
        created
    }

    /// Drop entries whose key is not in `live_keys`, returning the removed
    /// keys. Callers opt into this; by default vanished files keep their
    /// entries (and identifiers) forever.
    pub fn prune_missing(&mut self, live_keys: &HashSet<String>) -> Vec<String> {
        let stale: Vec<String> = self
            .entries
            .keys()
            .filter(|key| !live_keys.contains(*key))
            .cloned()
            .collect();
        for key in &stale {
            self.entries.remove(key);
        }
        stale
    }

    /// Serialize the entire mapping back to the backing file.
    ///
    /// Pretty-printed JSON, written to a temp file and renamed into place so
    /// an interrupted save leaves the previous state intact.
    pub async fn save(&self) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        log::debug!("Saved {} entries to {}", self.entries.len(), self.path.display());
        Ok(())
    }

    pub fn get(&self, rel_path: &str) -> Option<&FileEntry> {
        self.entries.get(rel_path)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> &BTreeMap<String, FileEntry> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
