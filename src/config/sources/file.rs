//! File sources: the optional `pagegraph.toml` in the working directory, or an explicit path.

use crate::config::DEFAULT_CONFIG_FILE;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::Path;

/// Add `<cwd>/pagegraph.toml` when it exists.
pub fn add_default_file(
    builder: ConfigBuilder<DefaultState>,
    cwd: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = cwd.join(DEFAULT_CONFIG_FILE);
    Ok(builder.add_source(File::from(path).required(false)))
}

/// Add an explicit config file; its format is inferred from the extension.
pub fn add_explicit_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    Ok(builder.add_source(File::from(path).required(true)))
}
