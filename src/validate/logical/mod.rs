//! Logical validation: forbidden rules, required rules, contextual invariants.
//!
//! The three stages always run in that order for a category. A critical
//! finding at any stage ends logical validation immediately; soft findings
//! are held back so a later critical finding can still take precedence.

mod contextual;
mod forbidden;
mod required;


use crate::catalog::CategoryRuleSet;
use crate::config::EngineConfig;
use crate::validate::types::{Severity, TestOutcome};
use tracing::debug;

pub use contextual::check_contextual;
pub use forbidden::{ForbiddenHit, check_forbidden};
pub use required::{MissingRequirement, check_required};

/// Name of the single outcome recorded for the logical stage.
pub const LOGICAL_CHECK_NAME: &str = "Logical Validation";

/// Which stage produced a logical issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalIssueKind {
    Forbidden,
    MissingRequired,
    Contextual,
}

/// A logical finding, ready to become a test outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalIssue {
    pub kind: LogicalIssueKind,
    /// Forbidden pattern, required rule, or contextual check name.
    pub rule: &'static str,
    pub critical: bool,
    pub message: String,
    pub suggestion: Option<String>,
}

impl LogicalIssue {
    fn forbidden(hit: ForbiddenHit) -> Self {
        Self {
            kind: LogicalIssueKind::Forbidden,
            rule: hit.pattern,
            critical: true,
            message: hit.message.to_string(),
            suggestion: Some(hit.message.to_string()),
        }
    }

    fn missing(missing: MissingRequirement) -> Self {
        Self {
            kind: LogicalIssueKind::MissingRequired,
            rule: missing.rule,
            critical: missing.critical,
            message: format!("Missing required pattern: {}", missing.rule),
            suggestion: Some(missing.fix.to_string()),
        }
    }

    fn contextual(violation: crate::catalog::ContextualViolation) -> Self {
        Self {
            kind: LogicalIssueKind::Contextual,
            rule: violation.check,
            critical: violation.critical,
            message: violation.message,
            suggestion: Some(violation.fix.to_string()),
        }
    }

    /// Convert into the failed logical outcome.
    pub fn into_outcome(self) -> TestOutcome {
        let severity = if self.critical {
            Severity::Critical
        } else {
            Severity::Warning
        };
        TestOutcome::fail(LOGICAL_CHECK_NAME, self.message)
            .with_suggestion(self.suggestion)
            .with_severity(Some(severity))
    }
}

/// Run forbidden, required, and contextual checks for one category.
///
/// Returns `None` when the submission is logically clean. Otherwise returns
/// the first critical issue found, or, when nothing critical was found, the
/// earliest soft issue.
pub fn run_logical_checks(
    rules: &CategoryRuleSet,
    source: &str,
    config: &EngineConfig,
) -> Option<LogicalIssue> {
    if let Some(hit) = check_forbidden(rules, source) {
        debug!(pattern = hit.pattern, "forbidden pattern matched");
        return Some(LogicalIssue::forbidden(hit));
    }

    let mut soft = None;

    if let Some(missing) = check_required(rules, source, config) {
        debug!(
            rule = missing.rule,
            weight = missing.weight,
            critical = missing.critical,
            "required pattern missing"
        );
        let issue = LogicalIssue::missing(missing);
        if issue.critical {
            return Some(issue);
        }
        soft = Some(issue);
    }

    if let Some(violation) = check_contextual(rules, source) {
        debug!(
            check = violation.check,
            critical = violation.critical,
            "contextual check failed"
        );
        let issue = LogicalIssue::contextual(violation);
        if issue.critical {
            return Some(issue);
        }
        soft.get_or_insert(issue);
    }

    soft
}

/// Outcome for a clean logical stage.
pub fn logical_pass() -> TestOutcome {
    TestOutcome::pass(LOGICAL_CHECK_NAME, "All logical checks passed")
}
