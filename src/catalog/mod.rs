//! The rule catalog: forbidden, required, and contextual rules per category.
//!
//! The catalog is immutable once built. `RuleCatalog::global()` builds the
//! built-in tables exactly once per process and hands out shared references,
//! so concurrent validations never need locking.

mod builtin;
mod rules;


use crate::category::Category;
use std::sync::LazyLock;

// Re-export public API
pub use rules::{
    Applicability, CategoryRuleSet, ContextualCheck, ContextualViolation, ForbiddenRule,
    Invariant, RequiredRule,
};

static GLOBAL_CATALOG: LazyLock<RuleCatalog> = LazyLock::new(RuleCatalog::builtin);

/// Rule sets for every category.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    /// Indexed by position in `Category::ALL`.
    sets: Vec<CategoryRuleSet>,
}

impl RuleCatalog {
    /// Build the built-in catalog.
    ///
    /// Compiles every pattern; prefer `RuleCatalog::global()` outside tests.
    pub fn builtin() -> Self {
        Self {
            sets: Category::ALL.iter().map(|c| builtin::rule_set(*c)).collect(),
        }
    }

    /// The process-wide built-in catalog.
    pub fn global() -> &'static RuleCatalog {
        &GLOBAL_CATALOG
    }

    /// Rule set for a category.
    pub fn rules_for(&self, category: Category) -> &CategoryRuleSet {
        &self.sets[category as usize]
    }
}
