//! Config loading, validation, and serialization.

use super::model::EngineConfig;
use crate::error::{GradeError, Result};
use std::path::Path;

impl EngineConfig {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(EngineConfig)` - Successfully loaded and validated config
    /// * `Err(GradeError::UserError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            GradeError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)
            .map_err(|e| GradeError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            GradeError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// - `pass_threshold` must be within 0..=100
    /// - `critical_weight` must be positive
    pub fn validate(&self) -> Result<()> {
        if self.pass_threshold > 100 {
            return Err(GradeError::UserError(format!(
                "config validation failed: pass_threshold must be between 0 and 100 (found {})",
                self.pass_threshold
            )));
        }

        if self.critical_weight == 0 {
            return Err(GradeError::UserError(
                "config validation failed: critical_weight must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether a missing required rule of this weight is critical.
    pub fn is_critical_weight(&self, weight: u32) -> bool {
        weight >= self.critical_weight
    }
}
