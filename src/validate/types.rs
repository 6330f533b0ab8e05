//! Outcome and result types produced by a validation run.

use crate::category::Category;
use serde::{Deserialize, Serialize};

/// How serious a failed outcome is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Forces the score to zero and stops grading.
    Critical,
    Error,
    Warning,
    Info,
}

/// Result of one check or test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub name: String,
    pub passed: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl TestOutcome {
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: message.into(),
            suggestion: None,
            severity: None,
            hint: None,
            example: None,
        }
    }

    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            passed: false,
            ..Self::pass(name, message)
        }
    }

    pub fn with_suggestion(mut self, suggestion: Option<String>) -> Self {
        self.suggestion = suggestion;
        self
    }

    pub fn with_severity(mut self, severity: Option<Severity>) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_hint(mut self, hint: Option<String>) -> Self {
        self.hint = hint;
        self
    }

    pub fn with_example(mut self, example: Option<String>) -> Self {
        self.example = example;
        self
    }

    /// Failed with critical severity.
    pub fn is_critical(&self) -> bool {
        !self.passed && self.severity == Some(Severity::Critical)
    }
}

/// The graded result for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub all_passed: bool,
    /// Percentage of passed outcomes, 0..=100.
    pub score: u8,
    pub category: Category,
    pub test_results: Vec<TestOutcome>,
    pub feedback: Vec<String>,
}

impl ValidationResult {
    /// Number of passed outcomes.
    pub fn passed_count(&self) -> usize {
        self.test_results.iter().filter(|t| t.passed).count()
    }

    /// Whether grading stopped on a critical failure.
    pub fn has_critical(&self) -> bool {
        self.test_results.iter().any(TestOutcome::is_critical)
    }
}
