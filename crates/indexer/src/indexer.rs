use crate::error::{IndexerError, Result};
use crate::filter::{FilterMode, FilterPolicy, MatchTarget, DEFAULT_ALLOWLIST_FILE_NAME};
use crate::fingerprint::fingerprint_file;
use crate::scanner::FileScanner;
use crate::stats::IndexStats;
use crate::summarizer::{language_hint, Summarizer};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use summarizeit_store::RecordStore;

pub const DEFAULT_STORE_FILE_NAME: &str = "summarizeit.json";

/// Optional overrides for [`Indexer::with_options`].
#[derive(Default)]
pub struct IndexerOptions {
    /// Backing store location. Defaults to `summarizeit.json` in the root.
    pub store_path: Option<PathBuf>,

    /// Filter policy. Defaults to a filename allowlist loaded from
    /// `.summarizeitallowedlist` in the root (built-in patterns when the
    /// file yields none).
    pub filter: Option<FilterPolicy>,

    /// Remove store entries whose files no longer exist on disk. Off by
    /// default: vanished files keep their entries and identifiers.
    pub prune_deleted: bool,
}

/// Incremental indexer for a directory tree.
///
/// A run walks the tree, fingerprints eligible files, summarizes new or
/// changed ones, and persists the updated record store in a single terminal
/// save. Unchanged files are left untouched so repeated runs are idempotent.
#[derive(Debug)]
pub struct Indexer {
    root: PathBuf,
    store_path: PathBuf,
    filter: FilterPolicy,
    prune_deleted: bool,
}

impl Indexer {
    /// Create an indexer with the default store location and filter policy.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_options(root, IndexerOptions::default()).await
    }

    pub async fn with_options(root: impl AsRef<Path>, options: IndexerOptions) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(IndexerError::InvalidRoot(format!(
                "{} does not exist or is not a directory",
                root.display()
            )));
        }

        let store_path = options
            .store_path
            .unwrap_or_else(|| root.join(DEFAULT_STORE_FILE_NAME));
        let filter = match options.filter {
            Some(filter) => filter,
            None => {
                FilterPolicy::from_file(
                    root.join(DEFAULT_ALLOWLIST_FILE_NAME),
                    FilterMode::Allow,
                    MatchTarget::FileName,
                )
                .await?
            }
        };

        Ok(Self {
            root,
            store_path,
            filter,
            prune_deleted: options.prune_deleted,
        })
    }

    pub fn filter(&self) -> &FilterPolicy {
        &self.filter
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Run one indexing pass.
    ///
    /// Per-file failures (unreadable file, summarizer error) are logged,
    /// counted, and skipped. Fatal conditions are a corrupt or unwritable
    /// store and an invalid root; those propagate.
    pub async fn run(&self, summarizer: &dyn Summarizer) -> Result<IndexStats> {
        let start = Instant::now();
        let mut stats = IndexStats::new();

        log::info!("Indexing {}", self.root.display());
        log::info!("Active filter patterns: {}", self.filter.patterns().join(", "));

        let mut store = RecordStore::load(&self.store_path).await?;

        let scanner = FileScanner::new(&self.root, self.filter.clone());
        let files = tokio::task::spawn_blocking(move || scanner.scan())
            .await
            .map_err(|err| IndexerError::Other(format!("join scan task: {err}")))?;

        let store_abs = absolute_path(&self.store_path);
        let mut live_keys: HashSet<String> = HashSet::new();

        for rel_path in files {
            let abs_path = self.root.join(&rel_path);

            // The store's own backing file is never indexed, even when the
            // active patterns would match it.
            if absolute_path(&abs_path) == store_abs {
                continue;
            }
            if !self.filter.should_include(&rel_path) {
                stats.files_filtered += 1;
                continue;
            }

            stats.files_seen += 1;
            live_keys.insert(rel_path.clone());

            let fingerprint = match fingerprint_file(&abs_path).await {
                Ok(fingerprint) => fingerprint,
                Err(err) => {
                    log::warn!("Failed to read {rel_path}: {err}");
                    stats.add_error(format!("{rel_path}: {err}"));
                    continue;
                }
            };

            if !store.has_changed(&rel_path, &fingerprint) {
                stats.files_unchanged += 1;
                continue;
            }

            log::info!("Processing {rel_path}");
            stats.summarizer_calls += 1;
            match summarizer
                .summarize(&abs_path, language_hint(&rel_path))
                .await
            {
                Ok(summary) => {
                    store.upsert(&rel_path, &fingerprint, &summary);
                    stats.files_indexed += 1;
                }
                Err(err) => {
                    // Leave any prior entry in place; it is merely stale.
                    log::warn!("Summarizer failed for {rel_path}: {err}");
                    stats.add_error(format!("{rel_path}: {err}"));
                }
            }
        }

        if self.prune_deleted {
            let removed = store.prune_missing(&live_keys);
            stats.entries_pruned = removed.len();
            for key in removed {
                log::info!("Pruned stale entry {key}");
            }
        }

        store.save().await?;

        stats.time_ms = start.elapsed().as_millis() as u64;
        log::info!(
            "Indexed {} files ({} unchanged, {} errors) in {} ms",
            stats.files_indexed,
            stats.files_unchanged,
            stats.errors.len(),
            stats.time_ms
        );
        Ok(stats)
    }
}

/// Absolute form of `path` for self-exclusion comparison. The backing file
/// may not exist yet, so canonicalize the parent and re-join the file name.
fn absolute_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map(|parent| parent.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}
