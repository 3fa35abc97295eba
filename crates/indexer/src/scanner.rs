use crate::filter::FilterPolicy;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Directory names never descended into, regardless of filter policy.
const IGNORED_DIR_NAMES: &[&str] = &[".git", "__pycache__", "node_modules", "venv", ".venv"];

/// Recursive walk over candidate files under a root.
///
/// The scanner prunes well-known non-code directories and, for full-path
/// deny policies, directories the policy excludes outright. It yields
/// `/`-normalized relative paths; per-file eligibility stays with the
/// caller's [`FilterPolicy::should_include`] check.
pub struct FileScanner {
    root: PathBuf,
    policy: FilterPolicy,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>, policy: FilterPolicy) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            policy,
        }
    }

    /// Enumerate candidate files, relative to the root.
    pub fn scan(&self) -> Vec<String> {
        let mut files = Vec::new();

        let root = self.root.clone();
        let policy = self.policy.clone();
        let mut builder = WalkBuilder::new(&self.root);
        // The walk is driven entirely by our own policy: no gitignore or
        // hidden-file handling, so dotfiles stay eligible for custom patterns.
        builder
            .hidden(false)
            .ignore(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .require_git(false)
            .parents(false);
        builder.filter_entry(move |entry| {
            let Ok(relative) = entry.path().strip_prefix(&root) else {
                return true;
            };
            if relative.as_os_str().is_empty() {
                return true;
            }
            if let Some(name) = entry.file_name().to_str() {
                if IGNORED_DIR_NAMES.contains(&name) {
                    return false;
                }
            }
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            if is_dir && policy.prunes_directory(&normalize(relative)) {
                log::debug!("Pruning excluded directory {}", relative.display());
                return false;
            }
            true
        });

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() {
                        continue;
                    }
                    if let Ok(relative) = entry.path().strip_prefix(&self.root) {
                        files.push(normalize(relative));
                    }
                }
                Err(err) => log::warn!("Failed to read entry: {err}"),
            }
        }

        log::debug!("Found {} candidate files", files.len());
        files
    }
}

fn normalize(relative: &Path) -> String {
    relative.to_string_lossy().replace('\\', "/")
}
