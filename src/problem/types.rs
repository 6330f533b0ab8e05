//! Problem metadata and per-problem test definitions.

use crate::category::Category;
use crate::validate::quality::QualityCheckKind;
use crate::validate::types::Severity;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Metadata supplied by the problem bank for one exercise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemMetadata {
    pub title: String,
    pub description: String,
    pub starter_code: String,
    /// Explicit category override; skips keyword classification.
    #[serde(alias = "explicit_category", skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub tests: Vec<TestDefinition>,
}

/// One problem-specific test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestDefinition {
    pub name: String,
    /// Written as a map in YAML: `check: { any_of: [ { contains: "x" } ] }`.
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub check: TestCheck,
    /// Quality check to run first; on failure the main check is skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax_check: Option<QualityCheckKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl TestDefinition {
    /// A test that passes iff `predicate` holds.
    pub fn direct(name: impl Into<String>, predicate: Predicate) -> Self {
        Self::new(name, TestCheck::Direct(predicate))
    }

    /// A flexible test that passes iff any alternative holds.
    pub fn any_of(name: impl Into<String>, alternatives: Vec<Predicate>) -> Self {
        Self::new(name, TestCheck::AnyOf(alternatives))
    }

    fn new(name: impl Into<String>, check: TestCheck) -> Self {
        Self {
            name: name.into(),
            check,
            syntax_check: None,
            hint: None,
            examples: Vec::new(),
            suggestions: Vec::new(),
            severity: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_syntax_check(mut self, kind: QualityCheckKind) -> Self {
        self.syntax_check = Some(kind);
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }
}

/// How a test decides pass/fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestCheck {
    /// Passes iff the single predicate holds.
    Direct(Predicate),
    /// Passes iff at least one alternative holds (multiple valid solutions).
    AnyOf(Vec<Predicate>),
}

/// Closure signature for programmatic predicates.
pub type PredicateFn = dyn Fn(&str) -> anyhow::Result<bool> + Send + Sync;

/// A predicate over the submission text.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Submission contains the literal text.
    Contains(String),
    /// Submission does not contain the literal text.
    NotContains(String),
    /// Submission matches the regex.
    Matches(String),
    /// Submission does not match the regex.
    NotMatches(String),
    /// Regex matches at least `min` times.
    CountAtLeast { pattern: String, min: usize },
    /// Every nested predicate holds.
    AllOf(Vec<Predicate>),
    /// Rust closure; only available when building problems in code.
    #[serde(skip)]
    Custom(Arc<PredicateFn>),
}

impl Predicate {
    /// Wrap a closure as a predicate.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        Predicate::Custom(Arc::new(f))
    }

    /// Evaluate against the submission.
    ///
    /// Regexes are compiled here, so an invalid pattern surfaces as an
    /// evaluation error for this test only.
    pub fn evaluate(&self, source: &str) -> anyhow::Result<bool> {
        match self {
            Predicate::Contains(text) => Ok(source.contains(text.as_str())),
            Predicate::NotContains(text) => Ok(!source.contains(text.as_str())),
            Predicate::Matches(pattern) => Ok(Regex::new(pattern)?.is_match(source)),
            Predicate::NotMatches(pattern) => Ok(!Regex::new(pattern)?.is_match(source)),
            Predicate::CountAtLeast { pattern, min } => {
                Ok(Regex::new(pattern)?.find_iter(source).count() >= *min)
            }
            Predicate::AllOf(predicates) => {
                for predicate in predicates {
                    if !predicate.evaluate(source)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Predicate::Custom(f) => f(source),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Contains(t) => f.debug_tuple("Contains").field(t).finish(),
            Predicate::NotContains(t) => f.debug_tuple("NotContains").field(t).finish(),
            Predicate::Matches(p) => f.debug_tuple("Matches").field(p).finish(),
            Predicate::NotMatches(p) => f.debug_tuple("NotMatches").field(p).finish(),
            Predicate::CountAtLeast { pattern, min } => f
                .debug_struct("CountAtLeast")
                .field("pattern", pattern)
                .field("min", min)
                .finish(),
            Predicate::AllOf(ps) => f.debug_tuple("AllOf").field(ps).finish(),
            Predicate::Custom(_) => f.write_str("Custom(<fn>)"),
        }
    }
}
