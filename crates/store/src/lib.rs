//! # Summarizeit Store
//!
//! Durable key-value record of indexed files.
//!
//! Maps each relative path to its content fingerprint, a stable external
//! identifier, and the generated summary. The whole mapping is loaded at the
//! start of an indexing run, mutated in memory, and written back wholesale at
//! the end.
//!
//! ## Example
//!
//! ```no_run
//! use summarizeit_store::RecordStore;
//!
//! #[tokio::main]
//! async fn main() -> summarizeit_store::Result<()> {
//!     let mut store = RecordStore::load("summarizeit.json").await?;
//!     if store.has_changed("src/main.py", "deadbeef") {
//!         store.upsert("src/main.py", "deadbeef", "Entry point.");
//!     }
//!     store.save().await?;
//!     Ok(())
//! }
//! ```

mod entry;
mod error;
mod store;

pub use entry::FileEntry;
pub use error::{Result, StoreError};
pub use store::RecordStore;
