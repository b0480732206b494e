//! MergeService: orchestrates sources, applies merge policy, deserializes to PagegraphConfig.

use crate::config::sources::{environment, file};
use crate::config::PagegraphConfig;
use config::{ConfigError, Map};
use std::path::Path;

use super::policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from the working directory and environment.
    /// Precedence: defaults (lowest) -> `pagegraph.toml` in `cwd` -> environment (highest).
    pub fn load(cwd: &Path) -> Result<PagegraphConfig, ConfigError> {
        Self::load_with_vars(cwd, None)
    }

    /// `load` with an explicit variable map standing in for the process environment.
    pub(crate) fn load_with_vars(
        cwd: &Path,
        vars: Option<Map<String, String>>,
    ) -> Result<PagegraphConfig, ConfigError> {
        let builder = policy::builder_with_defaults()?;
        let builder = file::add_default_file(builder, cwd)?;
        let builder = environment::add_with_vars(builder, vars)?;

        let config = builder.build()?;
        let mut config: PagegraphConfig = config.try_deserialize()?;
        if config.cwd.is_none() {
            config.cwd = Some(cwd.to_path_buf());
        }
        Ok(config)
    }

    /// Load config from a specific file with environment overlay.
    ///
    /// `cwd` stays unset unless the file (or environment) sets it; callers fall back to
    /// their own working directory, so `markdown_dir` and `output_dir` are not read
    /// relative to the file's location.
    pub fn load_from_file(path: &Path) -> Result<PagegraphConfig, ConfigError> {
        let builder = policy::builder_with_defaults()?;
        let builder = file::add_explicit_file(builder, path)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
