use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Store error: {0}")]
    StoreError(#[from] summarizeit_store::StoreError),

    #[error("Invalid root directory: {0}")]
    InvalidRoot(String),

    #[error("{0}")]
    Other(String),
}

/// Failure of the external summarizer collaborator. Per-file, never fatal to
/// a run: the orchestrator logs it and leaves any prior entry in place.
#[derive(Error, Debug)]
#[error("summarizer failed: {0}")]
pub struct SummarizerError(pub String);

impl SummarizerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
