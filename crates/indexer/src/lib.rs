//! # Summarizeit Indexer
//!
//! Incremental indexing of a directory tree.
//!
//! ## Pipeline
//!
//! ```text
//! Directory
//!     │
//!     ├──> File Scanner (prunes .git and friends)
//!     │      └─> Candidate files
//!     │
//!     ├──> Filter Policy (allow/deny glob patterns)
//!     │      └─> Eligible files
//!     │
//!     ├──> Fingerprinter (streamed sha256)
//!     │      └─> Changed files only
//!     │
//!     └──> Summarizer (injected collaborator)
//!            └─> Record Store (stable external ids)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use summarizeit_indexer::{Indexer, StubSummarizer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let indexer = Indexer::new("/path/to/project").await?;
//!     let stats = indexer.run(&StubSummarizer).await?;
//!
//!     println!("Indexed {} files, {} unchanged", stats.files_indexed, stats.files_unchanged);
//!     Ok(())
//! }
//! ```

mod error;
mod filter;
mod fingerprint;
mod indexer;
mod scanner;
mod stats;
mod summarizer;

pub use error::{IndexerError, Result, SummarizerError};
pub use filter::{
    FilterMode, FilterPolicy, MatchTarget, DEFAULT_ALLOWLIST_FILE_NAME, DEFAULT_ALLOW_PATTERNS,
    DEFAULT_IGNORE_FILE_NAME,
};
pub use fingerprint::{fingerprint_bytes, fingerprint_file};
pub use indexer::{Indexer, IndexerOptions, DEFAULT_STORE_FILE_NAME};
pub use scanner::FileScanner;
pub use stats::IndexStats;
pub use summarizer::{language_hint, StubSummarizer, Summarizer};
