//! Loading tuning configurations from disk

use std::fs;
use std::path::Path;

use super::schema::TuneConfig;
use super::validate::validate_config;
use crate::error::{Error, Result};

/// Load and validate a tuning config from a YAML file
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<TuneConfig> {
    let yaml_content = fs::read_to_string(config_path.as_ref()).map_err(|e| {
        Error::ConfigError(format!("Failed to read config file {}: {e}", config_path.as_ref().display()))
    })?;

    let config = parse_config(&yaml_content)?;
    validate_config(&config).map_err(|e| Error::ConfigError(format!("Invalid config: {e}")))?;

    Ok(config)
}

/// Parse a tuning config from YAML text without validating it
pub fn parse_config(yaml: &str) -> Result<TuneConfig> {
    if yaml.trim().is_empty() {
        return Ok(TuneConfig::default());
    }
    serde_yaml::from_str(yaml).map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {e}")))
}
