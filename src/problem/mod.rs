//! Problem metadata consumed from the problem bank.
//!
//! A problem carries its title, description, starter code, an optional
//! explicit category, and the list of problem-specific tests. Tests are
//! either direct (one predicate) or flexible (any of several predicates).

mod operations;
mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use types::{Predicate, PredicateFn, ProblemMetadata, TestCheck, TestDefinition};
