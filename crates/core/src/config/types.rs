use serde::{Deserialize, Serialize};

/// What render does when a required option was never set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredPolicy {
    /// Fail with `MissingRequiredArgument`.
    #[default]
    Fail,
    /// Leave the option out and let ffmpeg apply its default.
    Omit,
}

/// Root configuration
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub required_policy: RequiredPolicy,
    /// Fixed number of decimals for floats; shortest exact form when unset.
    #[serde(default)]
    pub float_precision: Option<u8>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            required_policy: RequiredPolicy::Fail,
            float_precision: None,
        }
    }
}

impl EngineConfig {
    /// Sets the required-option policy.
    pub fn with_required_policy(mut self, policy: RequiredPolicy) -> Self {
        self.required_policy = policy;
        self
    }

    /// Sets a fixed float precision.
    pub fn with_float_precision(mut self, precision: u8) -> Self {
        self.float_precision = Some(precision);
        self
    }
}
