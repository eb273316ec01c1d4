use super::{types::EngineConfig, ConfigError};

/// Largest precision that still changes the printed value of an f64.
const MAX_FLOAT_PRECISION: u8 = 17;

/// Validate configuration
/// Currently validates:
/// - Policy values (enforced by serde)
/// - Float precision is at most 17 decimals
pub fn validate_config(config: &EngineConfig) -> Result<(), ConfigError> {
    if let Some(precision) = config.float_precision {
        if precision > MAX_FLOAT_PRECISION {
            return Err(ConfigError::ValidationError(format!(
                "float_precision must be at most {MAX_FLOAT_PRECISION}, got {precision}"
            )));
        }
    }

    Ok(())
}
