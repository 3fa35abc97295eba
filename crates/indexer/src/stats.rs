use serde::{Deserialize, Serialize};

/// Statistics about one indexing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    /// Files accepted by the filter policy
    pub files_seen: usize,

    /// Files summarized and upserted (new or changed)
    pub files_indexed: usize,

    /// Files whose fingerprint matched the stored entry
    pub files_unchanged: usize,

    /// Files rejected by the filter policy
    pub files_filtered: usize,

    /// Stale entries removed by the opt-in prune pass
    pub entries_pruned: usize,

    /// Summarizer invocations (equals files_indexed unless some failed)
    pub summarizer_calls: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,

    /// Per-file errors encountered (run continued past them)
    pub errors: Vec<String>,
}

impl IndexStats {
    pub fn new() -> Self {
        Self {
            files_seen: 0,
            files_indexed: 0,
            files_unchanged: 0,
            files_filtered: 0,
            entries_pruned: 0,
            summarizer_calls: 0,
            time_ms: 0,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }
}

impl Default for IndexStats {
    fn default() -> Self {
        Self::new()
    }
}
