//! Doc comments from schema descriptions.

use std::fmt::Write as _;

/// Sanitize a line for use in Rust doc comments.
///
/// Square brackets are escaped so rustdoc does not read them as intra-doc links,
/// and stray carriage returns and tabs are dropped.
pub fn sanitize_doc_line(line: &str) -> String {
    let mut result = String::with_capacity(line.len());
    for ch in line.chars() {
        match ch {
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            '\r' => {}
            '\t' => result.push(' '),
            _ => result.push(ch),
        }
    }
    result.trim_end().to_string()
}

/// Write a sanitized doc comment line with proper prefix
pub fn write_doc_line(buf: &mut String, text: &str, indent: &str) -> std::fmt::Result {
    let sanitized = sanitize_doc_line(text);
    if sanitized.is_empty() {
        writeln!(buf, "{}///", indent)
    } else {
        writeln!(buf, "{}/// {}", indent, sanitized)
    }
}

/// Write a sanitized multi-line doc comment, dropping blank lines.
pub fn write_doc_comment(buf: &mut String, text: &str, indent: &str) -> std::fmt::Result {
    for line in text.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            write_doc_line(buf, trimmed, indent)?;
        }
    }
    Ok(())
}

/// Documentation attached to a generated item.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemDocs<'a> {
    /// Schema description.
    pub description: Option<&'a str>,
    /// Marked experimental in the schema.
    pub experimental: bool,
    /// Marked deprecated in the schema.
    pub deprecated: bool,
}

impl<'a> ItemDocs<'a> {
    /// Docs for an item with the given flags.
    pub fn new(description: Option<&'a str>, experimental: bool, deprecated: bool) -> Self {
        Self { description, experimental, deprecated }
    }

    /// Docs with only a description.
    pub fn text(description: &'a str) -> Self {
        Self { description: Some(description), ..Self::default() }
    }

    fn has_description(&self) -> bool { self.description.is_some_and(|d| !d.trim().is_empty()) }

    /// Write `///` lines: the description, then a paragraph with the flags.
    pub fn write(&self, buf: &mut String, indent: &str) -> std::fmt::Result {
        if let Some(description) = self.description {
            write_doc_comment(buf, description, indent)?;
        }
        let notes = self.notes();
        if notes.is_empty() {
            return Ok(());
        }
        if self.has_description() {
            write_doc_line(buf, "", indent)?;
        }
        write_doc_line(buf, &notes, indent)
    }

    fn notes(&self) -> String {
        match (self.experimental, self.deprecated) {
            (true, true) => "**Experimental.** **Deprecated.**".to_string(),
            (true, false) => "**Experimental.**".to_string(),
            (false, true) => "**Deprecated.**".to_string(),
            (false, false) => String::new(),
        }
    }
}

/// Write `//!` module docs for a title line and optional body.
pub fn write_module_docs(buf: &mut String, title: &str, docs: ItemDocs<'_>) -> std::fmt::Result {
    writeln!(buf, "//! {}", sanitize_doc_line(title))?;
    let mut body = String::new();
    docs.write(&mut body, "")?;
    if !body.is_empty() {
        writeln!(buf, "//!")?;
        for line in body.lines() {
            writeln!(buf, "//!{}", line.trim_start_matches("///"))?;
        }
    }
    Ok(())
}
