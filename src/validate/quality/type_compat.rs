//! Declared-type vs. format-specifier compatibility.
//!
//! Types come from a flat `<type> <name>` scan; scopes are ignored. A name
//! declared with two different type classes is treated as unknown.

use super::QualityReport;
use super::print_format::{ArgSlot, FormatSpec, print_calls};
use crate::source::{blank_preprocessor, strip_comments};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?P<ty>(?:(?:unsigned|signed|const|volatile|static)\s+)*(?:long\s+long|long|int|short|char|bool|size_t|ssize_t|[us](?:8|16|32|64)|float|double|struct\s+\w+)(?:\s+int)?)(?P<ptr>[\s*]+)(?P<name>[A-Za-z_]\w*)\s*(?P<next>[\[=;,)])",
    )
    .expect("invalid regex")
});

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_]\w*$").expect("invalid regex"));

/// Coarse type families used for specifier checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass {
    Char,
    Int,
    Long,
    Size,
    Bool,
    Float,
    /// `char *` or a `char` array.
    Str,
    Pointer,
}

impl TypeClass {
    fn describe(self) -> &'static str {
        match self {
            TypeClass::Char => "char",
            TypeClass::Int => "int",
            TypeClass::Long => "long",
            TypeClass::Size => "size_t",
            TypeClass::Bool => "bool",
            TypeClass::Float => "floating-point",
            TypeClass::Str => "string",
            TypeClass::Pointer => "pointer",
        }
    }

    /// Specifier to suggest for a value of this class.
    fn suggested_specifier(self) -> &'static str {
        match self {
            TypeClass::Char => "%c",
            TypeClass::Int | TypeClass::Bool => "%d",
            TypeClass::Long => "%ld",
            TypeClass::Size => "%zu",
            TypeClass::Float => "%f",
            TypeClass::Str => "%s",
            TypeClass::Pointer => "%p",
        }
    }
}

fn classify_declaration(ty: &str, pointer: bool, array: bool) -> Option<TypeClass> {
    let words: Vec<&str> = ty.split_whitespace().collect();
    let is = |w: &str| words.contains(&w);

    if is("char") && (pointer || array) {
        return Some(TypeClass::Str);
    }
    if pointer || array {
        return Some(TypeClass::Pointer);
    }
    if is("struct") {
        return None;
    }

    let class = if is("char") {
        TypeClass::Char
    } else if is("bool") {
        TypeClass::Bool
    } else if is("float") || is("double") {
        TypeClass::Float
    } else if is("size_t") || is("ssize_t") {
        TypeClass::Size
    } else if is("long") || is("u64") || is("s64") {
        TypeClass::Long
    } else {
        TypeClass::Int
    };
    Some(class)
}

/// Map each declared name to its type class; conflicting names map to `None`.
pub(super) fn declared_types(code: &str) -> HashMap<String, Option<TypeClass>> {
    let mut types: HashMap<String, Option<TypeClass>> = HashMap::new();

    for caps in DECLARATION.captures_iter(code) {
        let ty = &caps["ty"];
        let pointer = caps["ptr"].contains('*');
        let array = &caps["next"] == "[";
        let Some(class) = classify_declaration(ty, pointer, array) else {
            continue;
        };

        types
            .entry(caps["name"].to_string())
            .and_modify(|known| {
                if *known != Some(class) {
                    *known = None;
                }
            })
            .or_insert(Some(class));
    }

    types
}

/// Whether `spec` accepts a value of `class`.
fn accepts(spec: &FormatSpec, class: TypeClass) -> bool {
    use TypeClass::*;

    match spec.conversion {
        'd' | 'i' | 'u' | 'x' | 'X' | 'o' => match spec.length.as_str() {
            "" => matches!(class, Int | Bool),
            "h" | "hh" => matches!(class, Int | Bool | Char),
            "l" => matches!(class, Long | Size),
            "ll" | "L" | "j" => matches!(class, Long),
            "z" | "t" => matches!(class, Size),
            _ => true,
        },
        'c' => matches!(class, Char | Int),
        's' => matches!(class, Str),
        'p' => matches!(class, Pointer | Str),
        'f' | 'F' | 'e' | 'E' | 'g' | 'G' => matches!(class, Float),
        'n' => matches!(class, Pointer),
        _ => true,
    }
}

/// Flag the first bare variable passed to a specifier that does not fit its
/// declared type.
pub fn check_type_compatibility(source: &str) -> QualityReport {
    let code = blank_preprocessor(&strip_comments(source));
    let types = declared_types(&code);

    for call in print_calls(&code) {
        for (slot, arg) in call.slots().iter().zip(call.args.iter()) {
            let ArgSlot::Spec(spec) = slot else {
                continue;
            };
            if !IDENTIFIER.is_match(arg) {
                continue;
            }
            let Some(Some(class)) = types.get(*arg).copied() else {
                continue;
            };
            if accepts(spec, class) {
                continue;
            }

            return QualityReport::fail(
                format!(
                    "Type mismatch in {}() at line {}: '{}' used with {} variable '{}'",
                    call.function,
                    call.line,
                    spec.text,
                    class.describe(),
                    arg
                ),
                format!(
                    "Use '{}' to print '{}', or cast it to the type '{}' expects",
                    class.suggested_specifier(),
                    arg,
                    spec.text
                ),
            );
        }
    }

    QualityReport::pass()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declarations_are_classified() {
        let code = "char ch; char *msg; char buf[16]; int n; unsigned long flags;\n\
                    size_t len = 0; struct device *dev; bool on; u64 big;";
        let types = declared_types(code);

        assert_eq!(types["ch"], Some(TypeClass::Char));
        assert_eq!(types["msg"], Some(TypeClass::Str));
        assert_eq!(types["buf"], Some(TypeClass::Str));
        assert_eq!(types["n"], Some(TypeClass::Int));
        assert_eq!(types["flags"], Some(TypeClass::Long));
        assert_eq!(types["len"], Some(TypeClass::Size));
        assert_eq!(types["dev"], Some(TypeClass::Pointer));
        assert_eq!(types["on"], Some(TypeClass::Bool));
        assert_eq!(types["big"], Some(TypeClass::Long));
    }

    #[test]
    fn conflicting_declarations_are_ambiguous() {
        let types = declared_types("void a(void) { int x; }\nvoid b(void) { char x; }");
        assert_eq!(types["x"], None);
    }

    #[test]
    fn int_specifier_with_char_variable_is_flagged() {
        let src = "void f(void)\n{\n    char ch = 'a';\n    pr_info(\"value: %d\\n\", ch);\n}\n";
        let report = check_type_compatibility(src);

        assert!(!report.valid);
        assert_eq!(
            report.error.as_deref(),
            Some("Type mismatch in pr_info() at line 4: '%d' used with char variable 'ch'")
        );
        assert!(report.suggestion.unwrap().contains("'%c'"));
    }

    #[test]
    fn compatible_arguments_pass() {
        let src = "int n; char *name; char c; size_t len; unsigned long f;\n\
                   pr_info(\"%d %s %c %zu %lu %p\\n\", n, name, c, len, f, name);";
        assert!(check_type_compatibility(src).valid);
    }

    #[test]
    fn expressions_and_unknown_names_are_skipped() {
        let src = "char ch;\npr_info(\"%d %d\\n\", (int)ch, other);";
        assert!(check_type_compatibility(src).valid);
    }

    #[test]
    fn star_width_consumes_an_argument() {
        let src = "int width; char *s;\npr_info(\"%*s\\n\", width, s);";
        assert!(check_type_compatibility(src).valid);
    }
}
