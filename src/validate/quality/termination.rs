//! Statement-termination heuristic.

use super::QualityReport;
use crate::source::{blank_preprocessor, paren_delta, strip_comments};
use regex::Regex;
use std::sync::LazyLock;

static CONTROL_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:if|else|for|while|do|switch|case|default)\b|^return\s*;")
        .expect("invalid regex")
});

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_*(][\w\s*.\->\[\]()]*?(?:[-+*/%&|^]|<<|>>)?=(?:[^=]|$)")
        .expect("invalid regex")
});

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:static|const|unsigned|signed|volatile|extern|register)\s+)*(?:int|char|short|long|bool|float|double|void|size_t|ssize_t|loff_t|dev_t|[us](?:8|16|32|64)|\w+_t|(?:struct|enum|union)\s+\w+)\b[\s*]+\w+",
    )
    .expect("invalid regex")
});

static PRINT_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:printk|pr_\w+|dev_(?:info|err|warn|dbg|notice)|printf|sprintf|snprintf|seq_printf)\s*\(")
        .expect("invalid regex")
});

/// Trailing tokens that continue a statement on the next line.
const CONTINUATIONS: &[&str] = &[
    "&&", "||", "=", "+", "-", "*", "/", "%", "|", "&", "^", "?", ":", "(", "<", ">",
];

/// Flag the first statement-like line that lacks a terminator.
///
/// Block and trailing comments, preprocessor directives (with their `\`
/// continuations), brace lines, control-flow headers, designated initializers,
/// and lines inside an open parenthesis are skipped.
pub fn check_statement_termination(source: &str) -> QualityReport {
    let code = blank_preprocessor(&strip_comments(source));
    let mut depth = 0i32;

    for (idx, raw) in code.lines().enumerate() {
        let line = raw.trim();
        let line_no = idx + 1;

        let continued = depth > 0;
        depth = (depth + paren_delta(line)).max(0);

        if line.is_empty()
            || continued
            || depth > 0
            || line.contains('{')
            || line.contains('}')
            || line.starts_with('.')
            || CONTROL_KEYWORD.is_match(line)
        {
            continue;
        }

        if line.ends_with(';') || line.ends_with(',') || line.ends_with(')') {
            continue;
        }
        if CONTINUATIONS.iter().any(|tok| line.ends_with(tok)) {
            continue;
        }

        if ASSIGNMENT.is_match(line) || DECLARATION.is_match(line) || PRINT_CALL.is_match(line) {
            return QualityReport::fail(
                format!("Missing semicolon at line {line_no}: {line}"),
                format!("Add a semicolon (;) at the end of line {line_no}"),
            );
        }
    }

    QualityReport::pass()
}
