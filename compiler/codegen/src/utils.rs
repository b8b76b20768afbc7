// codegen/src/utils.rs

//! Identifier mapping from schema names to Rust names.

use std::collections::BTreeSet;

/// Strict and reserved keywords that cannot be used as plain identifiers.
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that are not accepted as raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Convert a camelCase or PascalCase schema name to snake_case.
///
/// Runs of capitals are kept together as one word, so acronyms come out whole.
///
/// # Examples
/// ```
/// use protogen_codegen::utils::snake_case;
/// assert_eq!(snake_case("DOMDebugger"), "dom_debugger");
/// assert_eq!(snake_case("getHTML"), "get_html");
/// assert_eq!(snake_case("setIgnoreCertificateErrors"), "set_ignore_certificate_errors");
/// ```
pub fn snake_case(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut result = String::with_capacity(input.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower);
            if boundary && !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
        }
        result.push(c.to_ascii_lowercase());
    }

    while result.ends_with('_') {
        result.pop();
    }
    result
}

/// Upper-case the first letter of every alphanumeric run and join the runs.
///
/// The remaining letters keep their case: `no-referrer` becomes `NoReferrer`,
/// `consoleAPICalled` becomes `ConsoleAPICalled`.
pub fn pascal_case(input: &str) -> String {
    input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Whether `ident` is a Rust keyword.
pub fn is_keyword(ident: &str) -> bool { RUST_KEYWORDS.contains(&ident) }

/// Escape a keyword: raw identifier where allowed, trailing underscore otherwise.
pub fn escape_keyword(ident: &str) -> String {
    if NON_RAW_KEYWORDS.contains(&ident) {
        format!("{}_", ident)
    } else if is_keyword(ident) {
        format!("r#{}", ident)
    } else {
        ident.to_string()
    }
}

/// The identifier without a raw prefix.
pub fn unraw(ident: &str) -> &str { ident.strip_prefix("r#").unwrap_or(ident) }

/// Field, parameter and method identifier for a schema name.
pub fn field_ident(name: &str) -> String {
    let snake = snake_case(name);
    let snake = match snake.chars().next() {
        None => "value".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{}", snake),
        Some(_) => snake,
    };
    escape_keyword(&snake)
}

/// Directory name of a domain module.
pub fn module_dir(domain: &str) -> String { snake_case(domain) }

/// Module identifier of a domain, as written in `mod` items and paths.
pub fn module_ident(domain: &str) -> String { escape_keyword(&module_dir(domain)) }

/// Type identifier for a schema type id or a composed name.
pub fn type_ident(name: &str) -> String {
    let pascal = pascal_case(name);
    match pascal.chars().next() {
        None => "Unnamed".to_string(),
        Some(c) if c.is_ascii_digit() => format!("T{}", pascal),
        Some(_) if pascal == "Self" => "Self_".to_string(),
        Some(_) => pascal,
    }
}

/// Variant identifiers for a list of enum literals, in the same order.
///
/// Literals that map to the same identifier get a numeric suffix.
pub fn enum_variants(values: &[String]) -> Vec<String> {
    let mut taken = BTreeSet::new();
    values
        .iter()
        .map(|value| {
            let base = match pascal_case(value) {
                p if p.is_empty() => "Empty".to_string(),
                p if p.starts_with(|c: char| c.is_ascii_digit()) => format!("V{}", p),
                p if p == "Self" => "Self_".to_string(),
                p => p,
            };
            unique_name(&base, &mut taken)
        })
        .collect()
}

/// Claim `base` in `taken`, appending the first free numeric suffix on collision.
pub fn unique_name(base: &str, taken: &mut BTreeSet<String>) -> String {
    if taken.insert(base.to_string()) {
        return base.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}{}", base, n);
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Escape a string for use inside a Rust string literal.
pub fn string_literal(value: &str) -> String { format!("{:?}", value) }
