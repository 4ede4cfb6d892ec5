//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into [`crate::PftService`].
//! Request handling never reads process-wide environment variables.

use crate::validation::InputLimits;
use crate::{PftError, PftResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct CoreConfig {
    input_limits: InputLimits,
    enforce_input_limits: bool,
}

impl CoreConfig {
    pub fn new(input_limits: InputLimits, enforce_input_limits: bool) -> Self {
        Self {
            input_limits,
            enforce_input_limits,
        }
    }

    pub fn input_limits(&self) -> &InputLimits {
        &self.input_limits
    }

    pub fn enforce_input_limits(&self) -> bool {
        self.enforce_input_limits
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(InputLimits::default(), true)
    }
}

/// Parse the input-limit enforcement flag from an optional string value.
///
/// If `value` is `None` or empty/whitespace, limits are enforced.
pub fn enforce_limits_from_env_value(value: Option<String>) -> PftResult<bool> {
    let value = value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty());

    match value.as_deref() {
        None | Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(PftError::InvalidInput(format!(
            "PFT_ENFORCE_INPUT_LIMITS must be a boolean, got {other:?}"
        ))),
    }
}
