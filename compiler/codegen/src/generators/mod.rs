//! Unit generators, one per generated file of a domain module.
//!
//! Each generator renders a single unit for one domain from its
//! [`DomainContext`]. The shared helpers below write the struct and enum
//! shapes every unit uses, so a field or an enum literal is spelled the same
//! way wherever it appears.

use std::fmt::Write as _;

use ir::ResolvedParam;

use crate::context::{inline_enum_values, DomainContext, InlineOwner};
use crate::rust_types::Scope;
use crate::utils::{enum_variants, field_ident, string_literal, unraw};
use crate::Result;

/// Sub-crate generates: **`doc_comment`**
///
/// Turns schema descriptions and flags into `///` and `//!` comments.
pub mod doc_comment;

pub mod client_unit;
pub mod events_unit;
pub mod mod_unit;
pub mod types_unit;

pub use client_unit::ClientGenerator;
pub use events_unit::EventsGenerator;
pub use mod_unit::DomainModGenerator;
pub use types_unit::TypesGenerator;

use doc_comment::ItemDocs;

/// Lints silenced in every generated unit.
pub(crate) const UNIT_ALLOWS: &str = "#![allow(missing_docs, clippy::all)]";

/// Derives shared by every generated struct.
const STRUCT_DERIVES: &str =
    "#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]";

/// Derives shared by every generated enum of string literals.
const ENUM_DERIVES: &str =
    "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]";

/// Write a struct with one field per parameter.
///
/// Optional fields are `Option<_>`, default to `None` when absent and are
/// skipped on serialization. Every field whose identifier differs from the
/// wire name carries an exact `rename`.
pub(crate) fn write_struct(
    buf: &mut String,
    ctx: &DomainContext<'_>,
    scope: Scope,
    owner: &InlineOwner,
    name: &str,
    docs: ItemDocs<'_>,
    params: &[ResolvedParam],
) -> Result<()> {
    docs.write(buf, "")?;
    writeln!(buf, "{}", STRUCT_DERIVES)?;
    if params.is_empty() {
        writeln!(buf, "pub struct {} {{}}", name)?;
        return Ok(());
    }

    writeln!(buf, "pub struct {} {{", name)?;
    for param in params {
        let ident = field_ident(&param.name);
        ItemDocs::new(param.description.as_deref(), param.experimental, param.deprecated)
            .write(buf, "    ")?;
        let mut attrs = Vec::new();
        if unraw(&ident) != param.name {
            attrs.push(format!("rename = {}", string_literal(&param.name)));
        }
        if param.optional {
            attrs.push("default".to_string());
            attrs.push("skip_serializing_if = \"Option::is_none\"".to_string());
        }
        if !attrs.is_empty() {
            writeln!(buf, "    #[serde({})]", attrs.join(", "))?;
        }
        writeln!(buf, "    pub {}: {},", ident, ctx.field_type(owner, param, scope))?;
    }
    writeln!(buf, "}}")?;
    Ok(())
}

/// Write `parse`, the best-effort constructor from a JSON value.
pub(crate) fn write_parse_fn(buf: &mut String) -> Result<()> {
    writeln!(buf, "    /// Decode `value`, keeping it raw when it does not fit.")?;
    writeln!(buf, "    pub fn parse(value: serde_json::Value) -> transport::Lenient<Self> {{")?;
    writeln!(buf, "        transport::Lenient::decode(value)")?;
    writeln!(buf, "    }}")?;
    Ok(())
}

/// Write an enum of string literals with `as_str`, `Display` and `FromStr`.
pub(crate) fn write_enum(
    buf: &mut String,
    name: &str,
    docs: ItemDocs<'_>,
    values: &[String],
) -> Result<()> {
    let variants = enum_variants(values);

    docs.write(buf, "")?;
    writeln!(buf, "{}", ENUM_DERIVES)?;
    writeln!(buf, "pub enum {} {{", name)?;
    for (value, variant) in values.iter().zip(&variants) {
        writeln!(buf, "    #[serde(rename = {})]", string_literal(value))?;
        writeln!(buf, "    {},", variant)?;
    }
    writeln!(buf, "}}")?;
    writeln!(buf)?;

    let all = variants.iter().map(|v| format!("{}::{}", name, v)).collect::<Vec<_>>().join(", ");
    writeln!(buf, "impl {} {{", name)?;
    writeln!(buf, "    /// Every value, in schema order.")?;
    writeln!(buf, "    pub const ALL: &'static [{}] = &[{}];", name, all)?;
    writeln!(buf)?;
    writeln!(buf, "    /// Wire spelling of the value.")?;
    writeln!(buf, "    pub fn as_str(&self) -> &'static str {{")?;
    if variants.is_empty() {
        writeln!(buf, "        match *self {{}}")?;
    } else {
        writeln!(buf, "        match self {{")?;
        for (value, variant) in values.iter().zip(&variants) {
            writeln!(buf, "            {}::{} => {},", name, variant, string_literal(value))?;
        }
        writeln!(buf, "        }}")?;
    }
    writeln!(buf, "    }}")?;
    writeln!(buf, "}}")?;
    writeln!(buf)?;

    writeln!(buf, "impl std::fmt::Display for {} {{", name)?;
    writeln!(buf, "    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {{")?;
    writeln!(buf, "        f.write_str(self.as_str())")?;
    writeln!(buf, "    }}")?;
    writeln!(buf, "}}")?;
    writeln!(buf)?;

    writeln!(buf, "impl std::str::FromStr for {} {{", name)?;
    writeln!(buf, "    type Err = String;")?;
    writeln!(buf)?;
    writeln!(buf, "    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {{")?;
    writeln!(buf, "        match s {{")?;
    for (value, variant) in values.iter().zip(&variants) {
        writeln!(buf, "            {} => Ok({}::{}),", string_literal(value), name, variant)?;
    }
    writeln!(buf, "            other => Err(format!(\"unknown {} value: {{}}\", other)),", name)?;
    writeln!(buf, "        }}")?;
    writeln!(buf, "    }}")?;
    writeln!(buf, "}}")?;
    Ok(())
}

/// Write the inline enums declared on `params` of `owner`, each after a blank line.
pub(crate) fn write_inline_enums(
    buf: &mut String,
    ctx: &DomainContext<'_>,
    owner: &InlineOwner,
    params: &[ResolvedParam],
) -> Result<()> {
    for param in params {
        let inline = (inline_enum_values(param), ctx.inline_enum(owner, &param.name));
        let (Some(values), Some(name)) = inline else {
            continue;
        };
        writeln!(buf)?;
        let docs = ItemDocs::new(param.description.as_deref(), false, false);
        write_enum(buf, name, docs, values)?;
    }
    Ok(())
}
