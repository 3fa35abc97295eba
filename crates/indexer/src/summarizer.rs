use crate::error::SummarizerError;
use async_trait::async_trait;
use std::path::Path;

/// External documentation-generation collaborator.
///
/// Called once per new or changed file. A failure is a per-file condition:
/// the orchestrator logs it, keeps any prior entry, and continues the run.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        path: &Path,
        language_hint: Option<&str>,
    ) -> std::result::Result<String, SummarizerError>;
}

/// Placeholder summarizer until a real generator is wired in.
pub struct StubSummarizer;

#[async_trait]
impl Summarizer for StubSummarizer {
    async fn summarize(
        &self,
        path: &Path,
        _language_hint: Option<&str>,
    ) -> std::result::Result<String, SummarizerError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(format!("Summary of {name}"))
    }
}

/// Best-effort language hint for the summarizer, from the file extension.
#[must_use]
pub fn language_hint(rel_path: &str) -> Option<&'static str> {
    let ext = rel_path.rsplit('.').next()?;
    match ext {
        "py" | "pyw" => Some("python"),
        "js" | "jsx" | "mjs" | "cjs" => Some("javascript"),
        "ts" | "tsx" => Some("typescript"),
        "go" => Some("go"),
        "java" => Some("java"),
        "rb" => Some("ruby"),
        "php" => Some("php"),
        "rs" => Some("rust"),
        _ => None,
    }
}
