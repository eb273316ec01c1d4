use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::EngineConfig, ConfigError};

/// Load configuration from file with environment variable overrides.
///
/// Environment keys map flat onto top-level fields: `FILTERKIT_FLOAT_PRECISION`
/// sets `float_precision` and `FILTERKIT_REQUIRED_POLICY` sets
/// `required_policy`. Keys are not split on `_`, since the field names
/// themselves contain underscores and there are no nested sections.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: EngineConfig = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("FILTERKIT_"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<EngineConfig, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
