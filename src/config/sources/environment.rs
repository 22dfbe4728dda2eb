//! Process environment source: `__` separator for nested keys

use crate::normalize::NESTING_SEPARATOR;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add the process environment overlay to builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(Environment::default().separator(NESTING_SEPARATOR));
    Ok(builder)
}
