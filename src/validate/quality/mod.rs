//! Category-agnostic code quality heuristics.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. statement termination
//! 2. print-format consistency
//! 3. declared-type vs. specifier compatibility
//! 4. `bool` include
//! 5. brace balance
//!
//! A quality failure is never critical on its own.

mod print_format;
mod structure;
mod termination;
mod type_compat;


use crate::validate::types::{Severity, TestOutcome};
use serde::{Deserialize, Serialize};

pub use print_format::{ArgSlot, FormatSpec, check_print_format, parse_format};
pub use structure::{check_bool_include, check_brace_balance};
pub use termination::check_statement_termination;
pub use type_compat::{TypeClass, check_type_compatibility};

/// Name of the outcome recorded for the quality stage.
pub const QUALITY_CHECK_NAME: &str = "Code Quality";

/// A single quality check, or all of them in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityCheckKind {
    All,
    StatementTermination,
    PrintFormat,
    TypeCompatibility,
    BoolInclude,
    BraceBalance,
}

impl QualityCheckKind {
    /// Individual checks in evaluation order.
    pub const ORDERED: [QualityCheckKind; 5] = [
        QualityCheckKind::StatementTermination,
        QualityCheckKind::PrintFormat,
        QualityCheckKind::TypeCompatibility,
        QualityCheckKind::BoolInclude,
        QualityCheckKind::BraceBalance,
    ];
}

/// Result of a quality check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QualityReport {
    pub valid: bool,
    pub error: Option<String>,
    pub suggestion: Option<String>,
}

impl QualityReport {
    pub fn pass() -> Self {
        Self {
            valid: true,
            ..Default::default()
        }
    }

    pub fn fail(error: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
            suggestion: Some(suggestion.into()),
        }
    }

    /// The quality outcome recorded by the pipeline.
    pub fn into_outcome(self) -> TestOutcome {
        if self.valid {
            return TestOutcome::pass(QUALITY_CHECK_NAME, "Code quality checks passed");
        }
        let message = self
            .error
            .unwrap_or_else(|| "Code quality check failed".to_string());
        TestOutcome::fail(QUALITY_CHECK_NAME, message)
            .with_suggestion(self.suggestion)
            .with_severity(Some(Severity::Error))
    }
}

/// Run one check, or every check in order when `kind` is `All`.
pub fn run_check(kind: QualityCheckKind, source: &str) -> QualityReport {
    match kind {
        QualityCheckKind::All => validate_quality(source),
        QualityCheckKind::StatementTermination => check_statement_termination(source),
        QualityCheckKind::PrintFormat => check_print_format(source),
        QualityCheckKind::TypeCompatibility => check_type_compatibility(source),
        QualityCheckKind::BoolInclude => check_bool_include(source),
        QualityCheckKind::BraceBalance => check_brace_balance(source),
    }
}

/// Run all checks in order, stopping at the first failure.
pub fn validate_quality(source: &str) -> QualityReport {
    QualityCheckKind::ORDERED
        .iter()
        .map(|&kind| run_check(kind, source))
        .find(|report| !report.valid)
        .unwrap_or_else(QualityReport::pass)
}
