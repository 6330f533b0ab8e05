//! Contextual invariant evaluation.

use crate::catalog::{CategoryRuleSet, ContextualViolation};

/// Evaluate contextual checks in declared order; the first failure wins.
pub fn check_contextual(rules: &CategoryRuleSet, source: &str) -> Option<ContextualViolation> {
    rules
        .contextual
        .iter()
        .find_map(|check| check.evaluate(source))
}
