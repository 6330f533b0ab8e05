//! Implementation of the `kgrade rules` command.

use crate::cli::RulesArgs;
use kgrade::catalog::{Applicability, CategoryRuleSet, RuleCatalog};
use kgrade::category::Category;
use kgrade::error::{GradeError, Result};
use std::fmt::Write as _;

/// List the catalog, optionally for a single category.
pub fn cmd_rules(args: RulesArgs) -> Result<()> {
    let categories = select_categories(args.category.as_deref())?;
    let catalog = RuleCatalog::global();

    for category in categories {
        print!("{}", render_rule_set(category, catalog.rules_for(category)));
    }
    Ok(())
}

/// Resolve the `--category` filter.
pub fn select_categories(name: Option<&str>) -> Result<Vec<Category>> {
    let Some(name) = name else {
        return Ok(Category::ALL.to_vec());
    };

    Category::from_str(name).map(|c| vec![c]).ok_or_else(|| {
        let valid: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        GradeError::UserError(format!(
            "unknown category '{}' (expected one of: {})",
            name,
            valid.join(", ")
        ))
    })
}

/// One category's rules as an indented listing.
pub fn render_rule_set(category: Category, rules: &CategoryRuleSet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", category);

    let _ = writeln!(out, "  forbidden:");
    for rule in &rules.forbidden {
        let _ = writeln!(out, "    {}", rule.name);
    }

    let _ = writeln!(out, "  required:");
    for rule in &rules.required {
        let gate = match rule.applicability {
            Applicability::Always => "",
            Applicability::WhenPresent(_) => " (conditional)",
            Applicability::UnlessPresent(_) => " (unless exempt)",
        };
        let _ = writeln!(out, "    {} [weight {}]{}", rule.name, rule.weight, gate);
    }

    let _ = writeln!(out, "  contextual:");
    for check in &rules.contextual {
        let severity = if check.critical { "critical" } else { "soft" };
        let _ = writeln!(out, "    {} ({})", check.name, severity);
    }

    out
}
