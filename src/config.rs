//! Configuration for the build pipeline and query engine.
//!
//! Options are layered by [`MergeService`](merge::service::MergeService): built-in defaults,
//! an optional `pagegraph.toml` (or an explicit file), then `PAGEGRAPH_*` environment variables.

mod facade;
pub mod merge;
mod paths;
pub mod sources;

pub use facade::ConfigLoader;
pub use paths::ResolvedPaths;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "pagegraph.toml";

pub(crate) fn default_markdown_dir() -> PathBuf {
    PathBuf::from("content")
}

pub(crate) fn default_output_dir() -> PathBuf {
    PathBuf::from("build")
}

pub(crate) fn default_output_filename() -> PathBuf {
    PathBuf::from("pages.json")
}

/// Pagegraph configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagegraphConfig {
    /// Base for resolving relative paths; the process working directory when unset
    #[serde(default)]
    pub cwd: Option<PathBuf>,

    /// Content root holding the markdown tree
    #[serde(default = "default_markdown_dir")]
    pub markdown_dir: PathBuf,

    /// Directory the persisted graph is written into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Persisted graph file; relative names resolve against `output_dir`
    #[serde(default = "default_output_filename")]
    pub output_filename: PathBuf,

    /// Extra glob patterns excluded from discovery
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for PagegraphConfig {
    fn default() -> Self {
        Self {
            cwd: None,
            markdown_dir: default_markdown_dir(),
            output_dir: default_output_dir(),
            output_filename: default_output_filename(),
            ignore: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl PagegraphConfig {
    /// Configuration rooted at `cwd` with every other option at its default.
    pub fn with_cwd(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
            ..Self::default()
        }
    }
}
