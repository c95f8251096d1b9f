//! Loading and parsing of `helix.toml` configuration files.

use crate::error::ConfigError;
use crate::types::MappingConfig;
use std::path::Path;

/// Loads and validates a configuration from the given file path.
pub fn load_config(path: impl AsRef<Path>) -> Result<MappingConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates a configuration from TOML text.
pub fn parse_config(content: &str) -> Result<MappingConfig, ConfigError> {
    let config: MappingConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.anneal.validate()?;
    Ok(config)
}
