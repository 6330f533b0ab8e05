//! Forbidden-pattern evaluation.

use crate::catalog::CategoryRuleSet;

/// The first forbidden rule that matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForbiddenHit {
    pub pattern: &'static str,
    pub message: &'static str,
}

/// Check forbidden rules in catalog order; the first match wins.
///
/// Evaluation stops at the first hit so a student sees one blocking issue
/// at a time.
pub fn check_forbidden(rules: &CategoryRuleSet, source: &str) -> Option<ForbiddenHit> {
    rules
        .forbidden
        .iter()
        .find(|rule| rule.matches(source))
        .map(|rule| ForbiddenHit {
            pattern: rule.name,
            message: rule.message,
        })
}
