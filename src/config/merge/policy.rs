//! Default layer shared by every load path.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with the built-in defaults.
pub(crate) fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("markdown_dir", "content")?
        .set_default("output_dir", "build")?
        .set_default("output_filename", "pages.json")?
        .set_default("ignore", Vec::<String>::new())
}
