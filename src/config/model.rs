//! EngineConfig struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for a grading engine instance.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum score (0-100) for `all_passed` to be true.
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: u8,

    /// Missing required rules with at least this weight are critical.
    #[serde(default = "default_critical_weight")]
    pub critical_weight: u32,

    /// Blank out C comments before running forbidden/required/contextual rules.
    #[serde(default = "default_true")]
    pub strip_comments: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pass_threshold: default_pass_threshold(),
            critical_weight: default_critical_weight(),
            strip_comments: default_true(),
        }
    }
}
