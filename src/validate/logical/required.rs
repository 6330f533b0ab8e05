//! Required-pattern evaluation.

use crate::catalog::CategoryRuleSet;
use crate::config::EngineConfig;

/// The first applicable required rule missing from the submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingRequirement {
    pub rule: &'static str,
    pub weight: u32,
    pub fix: &'static str,
    pub critical: bool,
}

/// Check required rules in catalog order and report the first missing one.
///
/// A rule only counts when its applicability predicate holds for this
/// submission. Criticality comes from the rule weight and the configured
/// critical weight.
pub fn check_required(
    rules: &CategoryRuleSet,
    source: &str,
    config: &EngineConfig,
) -> Option<MissingRequirement> {
    rules
        .required
        .iter()
        .find(|rule| rule.is_missing(source))
        .map(|rule| MissingRequirement {
            rule: rule.name,
            weight: rule.weight,
            fix: rule.fix,
            critical: config.is_critical_weight(rule.weight),
        })
}
