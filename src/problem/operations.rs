//! Loading problem metadata from the problem bank's YAML files.

use super::types::ProblemMetadata;
use crate::error::{GradeError, Result};
use std::path::Path;

impl ProblemMetadata {
    /// Load a problem definition from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(ProblemMetadata)` - Parsed problem
    /// * `Err(GradeError::UserError)` - Read or parse failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            GradeError::UserError(format!(
                "failed to read problem file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content).map_err(|e| {
            GradeError::UserError(format!("{} (in '{}')", e, path.display()))
        })
    }

    /// Parse a problem definition from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| GradeError::UserError(format!("failed to parse problem YAML: {}", e)))
    }
}
