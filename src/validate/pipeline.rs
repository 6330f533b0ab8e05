//! Validation pipeline.
//!
//! Runs one submission through classification, logical checks, quality
//! checks, and problem tests, then scores it and builds feedback. A critical
//! logical failure stops the run after recording that single outcome.

use crate::catalog::RuleCatalog;
use crate::classify::classify;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::problem::ProblemMetadata;
use crate::source::strip_comments;
use crate::validate::feedback::generate_feedback;
use crate::validate::logical::{logical_pass, run_logical_checks};
use crate::validate::quality::validate_quality;
use crate::validate::runner::{compute_score, passes_threshold, run_tests};
use crate::validate::types::ValidationResult;
use std::borrow::Cow;
use tracing::{debug, info, instrument};

/// Grades submissions against a rule catalog.
///
/// Holds only shared, read-only state; one validator can grade any number
/// of submissions, concurrently if needed.
#[derive(Debug, Clone)]
pub struct Validator<'a> {
    catalog: &'a RuleCatalog,
    config: EngineConfig,
}

impl Default for Validator<'static> {
    fn default() -> Self {
        Self {
            catalog: RuleCatalog::global(),
            config: EngineConfig::default(),
        }
    }
}

impl Validator<'static> {
    /// A validator over the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns `GradeError::UserError` when `config` fails `EngineConfig::validate`.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Validator::with_catalog(RuleCatalog::global(), config)
    }
}

impl<'a> Validator<'a> {
    /// A validator over a caller-supplied catalog. The config is validated first.
    pub fn with_catalog(catalog: &'a RuleCatalog, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { catalog, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Grade one submission. Never fails: every problem becomes an outcome.
    #[instrument(skip_all, fields(problem = %problem.title, category = tracing::field::Empty))]
    pub fn validate(&self, problem: &ProblemMetadata, source: &str) -> ValidationResult {
        let category = classify(problem);
        tracing::Span::current().record("category", category.as_str());

        let rules = self.catalog.rules_for(category);
        let logical_source = if self.config.strip_comments {
            Cow::Owned(strip_comments(source))
        } else {
            Cow::Borrowed(source)
        };

        let mut outcomes = Vec::new();

        match run_logical_checks(rules, &logical_source, &self.config) {
            Some(issue) if issue.critical => {
                debug!(rule = issue.rule, "critical logical failure; skipping remaining checks");
                let outcomes = vec![issue.into_outcome()];
                let feedback = generate_feedback(&outcomes, 0, false, true);
                info!(score = 0, all_passed = false, "submission graded");
                return ValidationResult {
                    all_passed: false,
                    score: 0,
                    category,
                    test_results: outcomes,
                    feedback,
                };
            }
            Some(issue) => outcomes.push(issue.into_outcome()),
            None => outcomes.push(logical_pass()),
        }

        outcomes.push(validate_quality(source).into_outcome());
        outcomes.extend(run_tests(&problem.tests, source));

        let score = compute_score(&outcomes);
        let all_passed = passes_threshold(score, self.config.pass_threshold);
        let feedback = generate_feedback(&outcomes, score, all_passed, false);

        info!(
            score,
            all_passed,
            outcomes = outcomes.len(),
            "submission graded"
        );

        ValidationResult {
            all_passed,
            score,
            category,
            test_results: outcomes,
            feedback,
        }
    }
}

/// Grade a submission with the built-in catalog and default config.
pub fn validate(problem: &ProblemMetadata, source: &str) -> ValidationResult {
    Validator::default().validate(problem, source)
}
