//! Whole-file structure checks: the bool include and brace balance.

use super::QualityReport;
use crate::source::strip_comments;
use regex::Regex;
use std::sync::LazyLock;

static BOOL_USE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bbool\b").expect("invalid regex"));

static TYPES_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\s*include\s*<linux/types\.h>").expect("invalid regex"));

/// Using `bool` requires `<linux/types.h>`.
pub fn check_bool_include(source: &str) -> QualityReport {
    let code = strip_comments(source);
    if BOOL_USE.is_match(&code) && !TYPES_INCLUDE.is_match(&code) {
        return QualityReport::fail(
            "Missing #include <linux/types.h> for the bool type",
            "Add #include <linux/types.h> at the top of the file",
        );
    }
    QualityReport::pass()
}

/// Total `{` and `}` counts must match.
pub fn check_brace_balance(source: &str) -> QualityReport {
    let opening = source.matches('{').count();
    let closing = source.matches('}').count();
    if opening != closing {
        return QualityReport::fail(
            format!("Unbalanced braces: {opening} opening vs {closing} closing"),
            "Check that every opening brace '{' has a matching closing brace '}'",
        );
    }
    QualityReport::pass()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_without_include_fails() {
        let report = check_bool_include("static bool enabled = true;");
        assert!(!report.valid);
        assert_eq!(
            report.suggestion.as_deref(),
            Some("Add #include <linux/types.h> at the top of the file")
        );
    }

    #[test]
    fn bool_with_include_passes() {
        let src = "#include <linux/types.h>\nstatic bool enabled = true;";
        assert!(check_bool_include(src).valid);
    }

    #[test]
    fn bool_in_comment_or_identifier_is_ignored() {
        assert!(check_bool_include("/* bool */ int boolean_flag;").valid);
    }

    #[test]
    fn brace_counts_are_reported() {
        let report = check_brace_balance("void f(void) { if (x) { y(); }");
        assert!(!report.valid);
        assert_eq!(
            report.error.as_deref(),
            Some("Unbalanced braces: 2 opening vs 1 closing")
        );
    }

    #[test]
    fn balanced_braces_pass() {
        assert!(check_brace_balance("void f(void) { }").valid);
        assert!(check_brace_balance("").valid);
    }
}
