use serde::{Deserialize, Serialize};

/// One persisted record per indexed file.
///
/// Field names are the on-disk JSON format and must stay stable: external
/// consumers address files by `external_id` across runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileEntry {
    /// Content fingerprint (sha256 hex) of the file at last indexing.
    pub hash: String,

    /// Stable identifier, minted once per relative path and preserved
    /// verbatim on every later update.
    pub external_id: String,

    /// Generated summary, refreshed whenever `hash` changes.
    pub high_level_documentation: String,
}
