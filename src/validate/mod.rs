//! Validation engine for kernel-module submissions.
//!
//! - Logical checks: forbidden patterns, required patterns, contextual invariants
//! - Quality checks: category-agnostic syntax heuristics
//! - Runner: problem-specific direct and flexible tests, scoring
//! - Feedback: hints, fixes, and encouragement for failed outcomes

pub mod feedback;
pub mod logical;
pub mod pipeline;
pub mod quality;
pub mod runner;
pub mod types;


pub use feedback::generate_feedback;
pub use logical::{LOGICAL_CHECK_NAME, LogicalIssue, LogicalIssueKind, run_logical_checks};
pub use pipeline::{Validator, validate};
pub use quality::{QUALITY_CHECK_NAME, QualityCheckKind, QualityReport, run_check, validate_quality};
pub use runner::{compute_score, passes_threshold, run_test, run_tests};
pub use types::{Severity, TestOutcome, ValidationResult};
