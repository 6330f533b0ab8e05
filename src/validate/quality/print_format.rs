//! Print-format consistency: quoted format strings and specifier/argument counts.

use super::QualityReport;
use crate::source::{
    blank_preprocessor, call_arguments, line_number_at, split_arguments, strip_comments,
    string_literals,
};
use regex::Regex;
use std::sync::LazyLock;

static PRINT_FN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(printk|pr_(?:emerg|alert|crit|err|warn|warning|notice|info|debug|cont)|dev_(?:emerg|alert|crit|err|warn|notice|info|dbg)|printf|sprintf|snprintf|seq_printf)\s*\(",
    )
    .expect("invalid regex")
});

static LOG_LEVEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*KERN_(?:EMERG|ALERT|CRIT|ERR|WARNING|NOTICE|INFO|DEBUG|DEFAULT|CONT)\b")
        .expect("invalid regex")
});

/// One conversion in a format string, e.g. `%lu`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    /// The specifier as written, flags and width included.
    pub text: String,
    /// Length modifier (`h`, `hh`, `l`, `ll`, `z`, ...), possibly empty.
    pub length: String,
    pub conversion: char,
}

/// What consumes each argument after the format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgSlot {
    /// A `*` width or precision.
    Star,
    Spec(FormatSpec),
}

/// A print-style call found in the submission.
#[derive(Debug, Clone)]
pub struct PrintCall<'a> {
    pub function: &'a str,
    /// 1-based line of the call.
    pub line: usize,
    /// Concatenated format literal; `None` when the format is not a quoted string.
    pub format: Option<String>,
    /// Arguments after the format string.
    pub args: Vec<&'a str>,
}

impl PrintCall<'_> {
    /// Argument slots the format string expects, in order.
    pub fn slots(&self) -> Vec<ArgSlot> {
        self.format.as_deref().map(parse_format).unwrap_or_default()
    }
}

/// Position of the format argument for each print-style function.
fn format_index(function: &str) -> usize {
    match function {
        "sprintf" | "seq_printf" => 1,
        "snprintf" => 2,
        f if f.starts_with("dev_") => 1,
        _ => 0,
    }
}

/// Find every print-style call in `code`, which must already have comments
/// and preprocessor lines blanked.
pub(super) fn print_calls(code: &str) -> Vec<PrintCall<'_>> {
    let mut calls = Vec::new();

    for caps in PRINT_FN.captures_iter(code) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let open = whole.end() - 1;
        let Some((inner, _)) = call_arguments(code, open) else {
            continue;
        };

        let args = split_arguments(inner);
        let idx = format_index(name.as_str());
        let format = args.get(idx).and_then(|arg| format_literal(arg));
        let rest = args.get(idx + 1..).map(|rest| rest.to_vec()).unwrap_or_default();

        calls.push(PrintCall {
            function: name.as_str(),
            line: line_number_at(code, whole.start()),
            format,
            args: rest,
        });
    }

    calls
}

/// Concatenated contents of a format argument such as `KERN_INFO "a" "b"`.
fn format_literal(arg: &str) -> Option<String> {
    let arg = match LOG_LEVEL.find(arg) {
        Some(m) => &arg[m.end()..],
        None => arg,
    };
    let literals = string_literals(arg);
    if literals.is_empty() {
        return None;
    }
    Some(literals.concat())
}

/// Parse the argument slots of a format string. `%%` consumes nothing;
/// unrecognised conversions are ignored.
pub fn parse_format(format: &str) -> Vec<ArgSlot> {
    let chars: Vec<char> = format.chars().collect();
    let mut slots = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '%' {
            i += 1;
            continue;
        }
        if chars.get(i + 1) == Some(&'%') {
            i += 2;
            continue;
        }

        let start = i;
        i += 1;
        let mut stars = 0;

        while i < chars.len() && "-+ #0".contains(chars[i]) {
            i += 1;
        }
        if chars.get(i) == Some(&'*') {
            stars += 1;
            i += 1;
        } else {
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
        }
        if chars.get(i) == Some(&'.') {
            i += 1;
            if chars.get(i) == Some(&'*') {
                stars += 1;
                i += 1;
            } else {
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
        }

        let length_start = i;
        while i < chars.len() && "hlLzjt".contains(chars[i]) {
            i += 1;
        }
        let length: String = chars[length_start..i].iter().collect();

        let Some(&conversion) = chars.get(i) else {
            break;
        };
        if !"diouxXcspfFeEgGn".contains(conversion) {
            continue;
        }
        i += 1;
        // Kernel pointer extensions: %pS, %pI4, %pK, ...
        if conversion == 'p' {
            while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                i += 1;
            }
        }

        slots.extend(std::iter::repeat_n(ArgSlot::Star, stars));
        slots.push(ArgSlot::Spec(FormatSpec {
            text: chars[start..i].iter().collect(),
            length,
            conversion,
        }));
    }

    slots
}

/// Every print call must have a quoted format whose slots match its arguments.
pub fn check_print_format(source: &str) -> QualityReport {
    let code = blank_preprocessor(&strip_comments(source));

    for call in print_calls(&code) {
        if call.format.is_none() {
            return QualityReport::fail(
                format!(
                    "Format string in {}() at line {} is not a quoted string literal",
                    call.function, call.line
                ),
                format!(
                    "Pass a literal format string to {}(), e.g. {}(\"%d\\n\", value);",
                    call.function, call.function
                ),
            );
        }

        let expected = call.slots().len();
        let actual = call.args.len();
        if expected != actual {
            return QualityReport::fail(
                format!(
                    "Format string mismatch in {}() at line {}: {} format specifiers but {} arguments",
                    call.function, call.line, expected, actual
                ),
                format!(
                    "Make the number of format specifiers match the number of arguments passed to {}()",
                    call.function
                ),
            );
        }
    }

    QualityReport::pass()
}
