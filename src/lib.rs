//! Kgrade: static grading engine for kernel-module submissions.
//!
//! A submission is graded without compiling or running it:
//!
//! - the problem is classified into one [`Category`]
//! - the category's rules from the [`RuleCatalog`] are applied (forbidden
//!   patterns, applicability-gated required patterns, contextual invariants)
//! - category-agnostic quality heuristics run
//! - the problem's own direct and flexible tests run
//! - outcomes are scored against a pass threshold and turned into feedback
//!
//! ```no_run
//! use kgrade::problem::ProblemMetadata;
//!
//! let problem = ProblemMetadata::load("problems/hello.yaml")?;
//! let result = kgrade::validate(&problem, "/* submission */");
//! println!("{} {}", result.score, result.all_passed);
//! # Ok::<(), kgrade::error::GradeError>(())
//! ```

pub mod catalog;
pub mod category;
pub mod classify;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod problem;
pub mod source;
pub mod validate;

pub use catalog::RuleCatalog;
pub use category::Category;
pub use classify::classify;
pub use config::EngineConfig;
pub use error::{GradeError, Result};
pub use problem::{Predicate, ProblemMetadata, TestCheck, TestDefinition};
pub use validate::{TestOutcome, ValidationResult, Validator, validate};
