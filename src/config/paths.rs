//! Resolution of configured paths against the configured working directory.

use super::PagegraphConfig;
use crate::error::ApiError;
use std::path::{Path, PathBuf};

/// Absolute locations derived from a [`PagegraphConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub cwd: PathBuf,
    pub markdown_dir: PathBuf,
    pub output_dir: PathBuf,
    pub output_file: PathBuf,
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

impl PagegraphConfig {
    /// Resolve `markdown_dir` and `output_dir` against `cwd`, and `output_filename`
    /// against the resolved `output_dir`.
    pub fn resolve_paths(&self) -> Result<ResolvedPaths, ApiError> {
        let process_cwd = std::env::current_dir().map_err(|e| {
            ApiError::ConfigError(format!("Failed to read current directory: {}", e))
        })?;
        let cwd = match &self.cwd {
            Some(cwd) => resolve_against(&process_cwd, cwd),
            None => process_cwd,
        };
        let markdown_dir = resolve_against(&cwd, &self.markdown_dir);
        let output_dir = resolve_against(&cwd, &self.output_dir);
        let output_file = resolve_against(&output_dir, &self.output_filename);
        Ok(ResolvedPaths {
            cwd,
            markdown_dir,
            output_dir,
            output_file,
        })
    }
}
