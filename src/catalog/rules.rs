//! Rule types stored in the catalog.

use crate::source::count_matches;
use regex::Regex;

/// A pattern whose presence is a definite violation for a category.
#[derive(Debug, Clone)]
pub struct ForbiddenRule {
    /// Short identifier reported as the violated pattern.
    pub name: &'static str,
    /// Compiled matcher over the submission text.
    pub pattern: Regex,
    /// Message shown to the student when the rule fires.
    pub message: &'static str,
}

impl ForbiddenRule {
    /// Whether the rule fires on this source.
    pub fn matches(&self, source: &str) -> bool {
        self.pattern.is_match(source)
    }
}

/// Decides whether a required rule is enforced for a given submission.
#[derive(Debug, Clone)]
pub enum Applicability {
    /// Always enforced.
    Always,
    /// Enforced only when the submission matches this pattern.
    WhenPresent(Regex),
    /// Enforced unless the submission matches this pattern.
    UnlessPresent(Regex),
}

impl Applicability {
    /// Evaluate the predicate. Total and side-effect-free.
    pub fn applies(&self, source: &str) -> bool {
        match self {
            Applicability::Always => true,
            Applicability::WhenPresent(re) => re.is_match(source),
            Applicability::UnlessPresent(re) => !re.is_match(source),
        }
    }
}

/// A pattern whose absence, when applicable, marks the submission incomplete.
#[derive(Debug, Clone)]
pub struct RequiredRule {
    pub name: &'static str,
    pub pattern: Regex,
    /// Rules at or above the configured critical weight zero the score when missing.
    pub weight: u32,
    /// Fix text shown when the rule is missing.
    pub fix: &'static str,
    pub applicability: Applicability,
}

impl RequiredRule {
    /// Whether the rule is in play and unsatisfied.
    pub fn is_missing(&self, source: &str) -> bool {
        self.applicability.applies(source) && !self.pattern.is_match(source)
    }
}

/// Whole-text invariants checked after pattern rules.
#[derive(Debug, Clone)]
pub enum Invariant {
    /// Calls matching `open` and `close` must occur equally often.
    Balanced {
        open: Regex,
        close: Regex,
        describe: fn(usize, usize) -> String,
    },
    /// Calls matching `primary` must not outnumber calls matching `cover`.
    Covered {
        primary: Regex,
        cover: Regex,
        describe: fn(usize, usize) -> String,
    },
    /// If `acquire` appears, `release` must appear too.
    Paired {
        acquire: Regex,
        release: Regex,
        message: &'static str,
    },
}

/// A named contextual check with its severity.
#[derive(Debug, Clone)]
pub struct ContextualCheck {
    pub name: &'static str,
    pub invariant: Invariant,
    pub critical: bool,
    /// Fix text shown alongside a violation.
    pub fix: &'static str,
}

/// A failed contextual check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextualViolation {
    pub check: &'static str,
    pub critical: bool,
    pub message: String,
    pub fix: &'static str,
}

impl ContextualCheck {
    /// Whether the APIs this check cares about appear at all.
    pub fn applies(&self, source: &str) -> bool {
        match &self.invariant {
            Invariant::Balanced { open, close, .. } => {
                open.is_match(source) || close.is_match(source)
            }
            Invariant::Covered { primary, .. } => primary.is_match(source),
            Invariant::Paired { acquire, .. } => acquire.is_match(source),
        }
    }

    /// Evaluate the invariant; `None` when it holds or does not apply.
    pub fn evaluate(&self, source: &str) -> Option<ContextualViolation> {
        if !self.applies(source) {
            return None;
        }

        let message = match &self.invariant {
            Invariant::Balanced {
                open,
                close,
                describe,
            } => {
                let opened = count_matches(open, source);
                let closed = count_matches(close, source);
                (opened != closed).then(|| describe(opened, closed))
            }
            Invariant::Covered {
                primary,
                cover,
                describe,
            } => {
                let used = count_matches(primary, source);
                let covered = count_matches(cover, source);
                (used > covered).then(|| describe(used, covered))
            }
            Invariant::Paired {
                release, message, ..
            } => (!release.is_match(source)).then(|| message.to_string()),
        }?;

        Some(ContextualViolation {
            check: self.name,
            critical: self.critical,
            message,
            fix: self.fix,
        })
    }
}

/// All rules for one category, in evaluation order.
#[derive(Debug, Clone, Default)]
pub struct CategoryRuleSet {
    pub required: Vec<RequiredRule>,
    pub forbidden: Vec<ForbiddenRule>,
    pub contextual: Vec<ContextualCheck>,
}
