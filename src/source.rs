//! Text helpers shared by the logical and quality checks.
//!
//! Submissions are never parsed into an AST. These helpers understand just
//! enough C lexical structure (comments, string and character literals,
//! bracket nesting) to keep the regex-based checks honest.

use regex::Regex;

/// Replace C comments with spaces, keeping newlines and byte offsets intact.
///
/// String and character literals are left untouched, so `"http://x"` is not
/// mistaken for a line comment.
pub fn strip_comments(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'"' | b'\'' => {
                let end = literal_end(bytes, i);
                out.extend_from_slice(&bytes[i..end]);
                i = end;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    out.push(b' ');
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                out.extend_from_slice(b"  ");
                i += 2;
                while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                    out.push(if bytes[i] == b'\n' { b'\n' } else { b' ' });
                    i += 1;
                }
                if i < bytes.len() {
                    out.extend_from_slice(b"  ");
                    i += 2;
                }
            }
            _ => {
                out.push(b);
                i += 1;
            }
        }
    }

    // Only ASCII bytes were replaced with ASCII bytes, so UTF-8 is preserved.
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// 1-based line number of a byte offset.
pub fn line_number_at(source: &str, offset: usize) -> usize {
    source[..offset.min(source.len())].matches('\n').count() + 1
}

/// Number of non-overlapping matches of `pattern` in `source`.
pub fn count_matches(pattern: &Regex, source: &str) -> usize {
    pattern.find_iter(source).count()
}

/// Return the text between the parenthesis at `open` and its matching close.
///
/// `open` must index a `(`. Returns the inner text and the index just past the
/// closing parenthesis, or `None` when the call is never closed.
pub fn call_arguments(source: &str, open: usize) -> Option<(&str, usize)> {
    let bytes = source.as_bytes();
    if bytes.get(open) != Some(&b'(') {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = literal_end(bytes, i);
                continue;
            }
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&source[open + 1..i], i + 1));
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Split an argument list on top-level commas.
///
/// Commas nested inside parentheses, brackets, braces, or literals do not
/// split, so `max(a, b)` and `x ? f(1, 2) : 3` stay single arguments.
/// Arguments are trimmed; an empty list yields no arguments.
pub fn split_arguments(args: &str) -> Vec<&str> {
    let bytes = args.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = literal_end(bytes, i);
                continue;
            }
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            b',' if depth == 0 => {
                parts.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    let last = args[start..].trim();
    if !last.is_empty() || !parts.is_empty() {
        parts.push(last);
    }
    parts
}

/// Net parenthesis depth change over a line, ignoring literals.
pub fn paren_delta(line: &str) -> i32 {
    let bytes = line.as_bytes();
    let mut delta = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = literal_end(bytes, i);
                continue;
            }
            b'(' => delta += 1,
            b')' => delta -= 1,
            _ => {}
        }
        i += 1;
    }
    delta
}

/// Inner text of every double-quoted literal in `text`, in order.
///
/// Escapes are kept as written; adjacent literals come back as separate entries.
pub fn string_literals(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                let end = literal_end(bytes, i);
                let inner_end = if bytes.get(end - 1) == Some(&b'"') && end > i + 1 {
                    end - 1
                } else {
                    end
                };
                out.push(&text[i + 1..inner_end]);
                i = end;
            }
            b'\'' => i = literal_end(bytes, i),
            _ => i += 1,
        }
    }
    out
}

/// Blank out preprocessor lines, including `\`-continued macro bodies.
///
/// Line structure is kept so line numbers stay valid.
pub fn blank_preprocessor(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut in_directive = false;
    for line in source.split_inclusive('\n') {
        let body = line.trim_end_matches(['\n', '\r']);
        let trimmed = body.trim();
        if in_directive || trimmed.starts_with('#') {
            in_directive = trimmed.ends_with('\\');
            out.push_str(&line[body.len()..]);
        } else {
            out.push_str(line);
        }
    }
    out
}

/// Index just past the string/char literal starting at `start`.
///
/// Unterminated literals run to the end of the line.
fn literal_end(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_comments_blanks_line_and_block_comments() {
        let src = "int a; // malloc(1)\n/* free(x)\n */ int b;";
        let stripped = strip_comments(src);

        assert!(!stripped.contains("malloc"));
        assert!(!stripped.contains("free"));
        assert!(stripped.contains("int a;"));
        assert!(stripped.contains("int b;"));
        assert_eq!(stripped.len(), src.len());
        assert_eq!(stripped.matches('\n').count(), 2);
    }

    #[test]
    fn strip_comments_keeps_string_literals() {
        let src = r#"pr_info("see http://kernel.org /* not a comment */\n");"#;
        assert_eq!(strip_comments(src), src);
    }

    #[test]
    fn line_numbers_are_one_based() {
        let src = "a\nb\nc";
        assert_eq!(line_number_at(src, 0), 1);
        assert_eq!(line_number_at(src, 2), 2);
        assert_eq!(line_number_at(src, 4), 3);
    }

    #[test]
    fn call_arguments_handles_nesting_and_literals() {
        let src = r#"printk("(%d)", max(a, b)); rest"#;
        let open = src.find('(').unwrap();
        let (args, end) = call_arguments(src, open).unwrap();
        assert_eq!(args, r#""(%d)", max(a, b)"#);
        assert_eq!(&src[end..], "; rest");
    }

    #[test]
    fn call_arguments_unclosed_is_none() {
        assert!(call_arguments("printk(\"x\"", 6).is_none());
    }

    #[test]
    fn split_arguments_respects_depth() {
        let parts = split_arguments(r#""%d %s", f(a, b), c ? "x, y" : z"#);
        assert_eq!(parts, vec![r#""%d %s""#, "f(a, b)", r#"c ? "x, y" : z"#]);
    }

    #[test]
    fn split_arguments_empty() {
        assert!(split_arguments("").is_empty());
        assert!(split_arguments("   ").is_empty());
    }

    #[test]
    fn paren_delta_counts_open_calls() {
        assert_eq!(paren_delta("ret = request_irq(irq,"), 1);
        assert_eq!(paren_delta("handler, 0, \"(x\", dev);"), -1);
        assert_eq!(paren_delta("f(g(1));"), 0);
    }

    #[test]
    fn string_literals_are_extracted_in_order() {
        let lits = string_literals(r#"KERN_INFO "a %d" "b\"c" 'x'"#);
        assert_eq!(lits, vec!["a %d", r#"b\"c"#]);
        assert!(string_literals("fmt").is_empty());
    }

    #[test]
    fn blank_preprocessor_keeps_line_structure() {
        let src = "#include <linux/module.h>\n#define X(a) \\\n    (a + 1)\nint x = X(1);\n";
        let out = blank_preprocessor(src);
        assert_eq!(out, "\n\n\nint x = X(1);\n");
    }

    #[test]
    fn count_matches_counts_all() {
        let re = Regex::new(r"rcu_read_lock\s*\(").unwrap();
        assert_eq!(count_matches(&re, "rcu_read_lock(); rcu_read_lock ();"), 2);
    }
}
