//! Environment variable source: PAGEGRAPH_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::Map;

/// Add environment variable overlay to builder.
/// Uses PAGEGRAPH_ prefix and __ as separator for nested keys.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    add_with_vars(builder, None)
}

/// Same overlay, reading from `vars` instead of the process environment when given.
pub(crate) fn add_with_vars(
    builder: ConfigBuilder<DefaultState>,
    vars: Option<Map<String, String>>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("PAGEGRAPH")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(vars),
    );
    Ok(builder)
}
