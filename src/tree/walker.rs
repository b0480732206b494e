//! File discovery
//!
//! Enumerates every file and directory under a content root in lexicographic order,
//! pruning anything that matches an ignore pattern.

use crate::error::BuildError;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Patterns excluded from every scan: editor, VCS and package-manager artifacts plus build output.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "**/*.un~",
    "**/.DS_Store",
    "**/.gitignore",
    "**/.npmignore",
    "**/.babelrc",
    "**/yarn.lock",
    "**/bower_components",
    "**/node_modules",
    "**/dist",
    "**/.git",
];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    pub follow_symlinks: bool,
    /// Glob patterns matched against the slash-separated path relative to the root
    pub ignore_patterns: Vec<String>,
    pub max_depth: Option<usize>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore_patterns: DEFAULT_IGNORE_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            max_depth: None,
        }
    }
}

impl WalkerConfig {
    /// Default patterns extended with caller-supplied ones.
    pub fn with_extra_ignores<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::default();
        config.ignore_patterns.extend(extra.into_iter().map(Into::into));
        config
    }
}

/// A path found during discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredPath {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// One-shot scanner over a content root
#[derive(Debug, Clone)]
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
    patterns: Vec<Pattern>,
}

impl Walker {
    pub fn new(root: PathBuf, config: WalkerConfig) -> Result<Self, BuildError> {
        let patterns = config
            .ignore_patterns
            .iter()
            .map(|raw| {
                Pattern::new(raw).map_err(|e| {
                    BuildError::Discovery(format!("Invalid ignore pattern '{}': {}", raw, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            root,
            config,
            patterns,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether a path relative to the root is excluded.
    pub fn is_ignored(&self, relative: &str) -> bool {
        !relative.is_empty()
            && self
                .patterns
                .iter()
                .any(|pattern| pattern.matches_with(relative, MATCH_OPTIONS))
    }

    /// Walk the root, including the root directory itself.
    ///
    /// Entries are sorted by file name within each directory, so the result is stable for an
    /// unchanged tree. Ignored directories are pruned together with their contents.
    pub fn discover(&self) -> Result<Vec<DiscoveredPath>, BuildError> {
        let mut walk = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();
        if let Some(depth) = self.config.max_depth {
            walk = walk.max_depth(depth);
        }

        let mut discovered = Vec::new();
        let iter = walk
            .into_iter()
            .filter_entry(|entry| !self.is_ignored(&relative_path(&self.root, entry.path())));
        for entry in iter {
            let entry = entry.map_err(|e| BuildError::Discovery(e.to_string()))?;
            discovered.push(DiscoveredPath {
                path: entry.path().to_path_buf(),
                is_dir: entry.file_type().is_dir(),
            });
        }

        debug!(
            root = %self.root.display(),
            count = discovered.len(),
            "Discovery reached a stable point"
        );
        Ok(discovered)
    }
}

/// Slash-separated path of `path` relative to `root`; empty for the root itself.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.to_string_lossy().replace('\\', "/")
}
