//! Name sanitization
//!
//! Converts raw schema names (component keys, contextual `Parent.property`
//! hints, ref targets) into valid Python class and module names for the
//! generated client. Language-specific rendering beyond names is the
//! emitters' concern.

use regex::Regex;
use std::sync::OnceLock;

/// Python keywords that must not be used bare as identifiers
const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break",
    "class", "continue", "def", "del", "elif", "else", "except", "finally",
    "for", "from", "global", "if", "import", "in", "is", "lambda", "nonlocal",
    "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

fn word_splitter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\W_]+").expect("static regex"))
}

fn is_python_keyword(name: &str) -> bool {
    PYTHON_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(name))
}

/// Convert a raw name into a valid PascalCase class name.
///
/// Splits on non-word characters (so `Parent.child` becomes `ParentChild`),
/// uppercases the first letter of each part, prefixes a digit-leading result
/// with an underscore, and escapes Python keywords with a trailing underscore.
pub fn sanitize_class_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for part in word_splitter().split(name) {
        if part.is_empty() {
            continue;
        }
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    if is_python_keyword(&out) {
        out.push('_');
    }
    out
}

/// Convert a raw name into a valid snake_case module name,
/// splitting camelCase and PascalCase boundaries.
pub fn sanitize_module_name(name: &str) -> String {
    let mut module = String::with_capacity(name.len() + 4);
    for chunk in word_splitter().split(name) {
        if chunk.is_empty() {
            continue;
        }
        if !module.is_empty() {
            module.push('_');
        }
        let chars: Vec<char> = chunk.chars().collect();
        for (i, &c) in chars.iter().enumerate() {
            if c.is_ascii_uppercase() {
                let prev_lower = i > 0 && chars[i - 1].is_ascii_lowercase();
                // Acronym boundary: "HTTPError" splits before the "E"
                let acronym_end = i > 0
                    && chars[i - 1].is_ascii_uppercase()
                    && chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
                if prev_lower || acronym_end {
                    module.push('_');
                }
                module.push(c.to_ascii_lowercase());
            } else {
                module.push(c);
            }
        }
    }
    if module.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        module.insert(0, '_');
    }
    if is_python_keyword(&module) {
        module.push('_');
    }
    module
}
