//! Default values for engine configuration fields.

/// Score (percent) at or above which a submission passes.
pub const DEFAULT_PASS_THRESHOLD: u8 = 60;

/// Required-rule weight at or above which a missing rule is critical.
pub const DEFAULT_CRITICAL_WEIGHT: u32 = 20;

// Default value functions for serde
pub(crate) fn default_pass_threshold() -> u8 {
    DEFAULT_PASS_THRESHOLD
}
pub(crate) fn default_critical_weight() -> u32 {
    DEFAULT_CRITICAL_WEIGHT
}
pub(crate) fn default_true() -> bool {
    true
}
