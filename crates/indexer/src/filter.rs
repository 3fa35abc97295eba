use crate::error::{IndexerError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Built-in allowlist used when no usable pattern file is present.
pub const DEFAULT_ALLOW_PATTERNS: &[&str] = &[
    "*.py", "*.js", "*.jsx", "*.ts", "*.tsx", "*.go", "*.java", "*.rb", "*.php", "*.rs",
];

pub const DEFAULT_ALLOWLIST_FILE_NAME: &str = ".summarizeitallowedlist";
pub const DEFAULT_IGNORE_FILE_NAME: &str = ".ignoreindexing";

/// Polarity of a pattern set: does a match mean include or exclude?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// A path is eligible iff it matches at least one pattern.
    Allow,
    /// A path is eligible iff it matches no pattern.
    Deny,
}

/// What part of the relative path the patterns are matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTarget {
    FileName,
    FullPath,
}

/// Unified eligibility policy for indexing.
///
/// One configured instance replaces the two historical variants of this
/// concept: a filename allowlist (`.summarizeitallowedlist`) and a full-path
/// exclude list (`.ignoreindexing`). Mode and match target are explicit
/// rather than implied by which file the patterns came from.
#[derive(Clone, Debug)]
pub struct FilterPolicy {
    mode: FilterMode,
    target: MatchTarget,
    patterns: Vec<String>,
    set: GlobSet,
}

impl FilterPolicy {
    pub fn new(
        mode: FilterMode,
        target: MatchTarget,
        patterns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self> {
        let mut patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        if patterns.is_empty() {
            if mode == FilterMode::Allow {
                // An allowlist with no patterns would index nothing; fall
                // back to the built-in source-file set.
                patterns = DEFAULT_ALLOW_PATTERNS.iter().map(ToString::to_string).collect();
            }
            // An empty deny list legitimately excludes nothing.
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(err) => {
                    // Lenient line-oriented format: a line that is not valid
                    // glob syntax still counts, as a literal name.
                    log::warn!("Pattern {pattern:?} is not a valid glob ({err}); matching it literally");
                    let escaped = globset::escape(pattern);
                    builder.add(
                        Glob::new(&escaped)
                            .map_err(|err| IndexerError::Other(format!("escape pattern {pattern:?}: {err}")))?,
                    );
                }
            }
        }
        let set = builder
            .build()
            .map_err(|err| IndexerError::Other(format!("compile filter patterns: {err}")))?;

        Ok(Self {
            mode,
            target,
            patterns,
            set,
        })
    }

    /// Filename allowlist, the default policy.
    pub fn allow_list(patterns: impl IntoIterator<Item = impl Into<String>>) -> Result<Self> {
        Self::new(FilterMode::Allow, MatchTarget::FileName, patterns)
    }

    /// Full-path exclude list.
    pub fn deny_list(patterns: impl IntoIterator<Item = impl Into<String>>) -> Result<Self> {
        Self::new(FilterMode::Deny, MatchTarget::FullPath, patterns)
    }

    /// Load a policy from a line-oriented pattern file.
    ///
    /// Blank lines and `#` comments are skipped; every other line is a
    /// pattern. A missing or unreadable file behaves like an empty one:
    /// allow mode falls back to [`DEFAULT_ALLOW_PATTERNS`], deny mode
    /// excludes nothing.
    pub async fn from_file(
        path: impl AsRef<Path>,
        mode: FilterMode,
        target: MatchTarget,
    ) -> Result<Self> {
        let path = path.as_ref();
        let patterns = match tokio::fs::read_to_string(path).await {
            Ok(content) => parse_pattern_lines(&content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                log::warn!("Failed to read pattern file {}: {err}", path.display());
                Vec::new()
            }
        };
        Self::new(mode, target, patterns)
    }

    /// Whether `rel_path` is eligible for indexing.
    ///
    /// Both `/` and `\` separators are accepted; matching is platform
    /// independent.
    pub fn should_include(&self, rel_path: &str) -> bool {
        let normalized = rel_path.replace('\\', "/");
        let candidate = match self.target {
            MatchTarget::FileName => normalized.rsplit('/').next().unwrap_or(&normalized),
            MatchTarget::FullPath => normalized.as_str(),
        };
        let matched = self.set.is_match(candidate);
        match self.mode {
            FilterMode::Allow => matched,
            FilterMode::Deny => !matched,
        }
    }

    /// True when descent into `rel_dir` can be skipped entirely.
    ///
    /// Only a full-path deny policy can prune: an excluded directory excludes
    /// everything beneath it. Pruning is an optimization; the per-file
    /// [`FilterPolicy::should_include`] check is still authoritative.
    pub fn prunes_directory(&self, rel_dir: &str) -> bool {
        self.mode == FilterMode::Deny
            && self.target == MatchTarget::FullPath
            && self.set.is_match(rel_dir.replace('\\', "/"))
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn target(&self) -> MatchTarget {
        self.target
    }

    /// The active pattern set, in configuration order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

fn parse_pattern_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn default_allowlist_covers_common_source_files() {
        let policy = FilterPolicy::allow_list(Vec::<String>::new()).expect("policy");
        assert_eq!(policy.patterns(), DEFAULT_ALLOW_PATTERNS);

        assert!(policy.should_include("a.py"));
        assert!(policy.should_include("a.js"));
        assert!(!policy.should_include("a.txt"));
    }

    #[test]
    fn allowlist_matches_filename_component_only() {
        let policy = FilterPolicy::allow_list(Vec::<String>::new()).expect("policy");
        assert!(policy.should_include("path/to/test.py"));
        assert!(policy.should_include("path\\to\\test.py"));
        assert!(!policy.should_include("test.py/readme.txt"));
    }

    #[test]
    fn custom_patterns_replace_defaults() {
        let policy = FilterPolicy::allow_list(["*.md"]).expect("policy");
        assert!(policy.should_include("notes.md"));
        assert!(!policy.should_include("a.py"));
    }

    #[test]
    fn deny_policy_matches_full_path() {
        let policy = FilterPolicy::deny_list(["build/*", "*.lock"]).expect("policy");
        assert!(!policy.should_include("build/out.py"));
        assert!(!policy.should_include("Cargo.lock"));
        assert!(policy.should_include("src/main.py"));
    }

    #[test]
    fn empty_deny_list_excludes_nothing() {
        let policy = FilterPolicy::deny_list(Vec::<String>::new()).expect("policy");
        assert!(policy.should_include("anything.at.all"));
        assert!(policy.patterns().is_empty());
    }

    #[test]
    fn deny_fullpath_policy_can_prune_directories() {
        let policy = FilterPolicy::deny_list(["vendor*"]).expect("policy");
        assert!(policy.prunes_directory("vendor"));
        assert!(!policy.prunes_directory("src"));

        let allow = FilterPolicy::allow_list(["*.py"]).expect("policy");
        assert!(!allow.prunes_directory("vendor"));
    }

    #[test]
    fn invalid_glob_line_is_matched_literally() {
        let policy = FilterPolicy::allow_list(["weird[name"]).expect("policy");
        assert!(policy.should_include("weird[name"));
        assert!(!policy.should_include("weirdX"));
    }

    #[tokio::test]
    async fn pattern_file_skips_blanks_and_comments() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(DEFAULT_ALLOWLIST_FILE_NAME);
        tokio::fs::write(&path, "\n# Python files\n*.py\n# JavaScript files\n  *.js  \n")
            .await
            .expect("write");

        let policy = FilterPolicy::from_file(&path, FilterMode::Allow, MatchTarget::FileName)
            .await
            .expect("policy");
        assert_eq!(policy.patterns(), ["*.py", "*.js"]);
    }

    #[tokio::test]
    async fn empty_pattern_file_falls_back_to_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(DEFAULT_ALLOWLIST_FILE_NAME);
        tokio::fs::write(&path, "").await.expect("write");

        let policy = FilterPolicy::from_file(&path, FilterMode::Allow, MatchTarget::FileName)
            .await
            .expect("policy");
        assert_eq!(policy.patterns(), DEFAULT_ALLOW_PATTERNS);
    }

    #[tokio::test]
    async fn missing_pattern_file_falls_back_to_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let policy = FilterPolicy::from_file(
            dir.path().join("absent"),
            FilterMode::Allow,
            MatchTarget::FileName,
        )
        .await
        .expect("policy");
        assert_eq!(policy.patterns(), DEFAULT_ALLOW_PATTERNS);
    }
}
