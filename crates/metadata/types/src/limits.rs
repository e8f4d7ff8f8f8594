//! Structural validation limits.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LimitsError;

/// Size limits enforced by basic validation.
///
/// Loaded from TOML when a deployment needs different values; missing keys
/// fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    pub max_audit_message_length: usize,
    pub max_class_name_length: usize,
    pub max_description_name_length: usize,
    pub max_description_length: usize,
    pub max_url_length: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_audit_message_length: 200,
            max_class_name_length: 1000,
            max_description_name_length: 200,
            max_description_length: 5000,
            max_url_length: 2048,
        }
    }
}

impl ValidationLimits {
    pub fn from_toml_str(contents: &str) -> Result<Self, LimitsError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load limits from `path`, or the defaults if the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LimitsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
