//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::PagegraphConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from `pagegraph.toml` in `cwd` (if present) and environment.
    pub fn load(cwd: &Path) -> Result<PagegraphConfig, ConfigError> {
        MergeService::load(cwd)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<PagegraphConfig, ConfigError> {
        MergeService::load_from_file(path)
    }

    /// Create default configuration.
    pub fn default() -> PagegraphConfig {
        PagegraphConfig::default()
    }
}
