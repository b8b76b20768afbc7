//! `types.rs`: the named types of a domain.

use std::fmt::Write as _;

use ir::{ResolvedType, TypeShape};

use super::doc_comment::{write_module_docs, ItemDocs};
use super::{write_enum, write_inline_enums, write_parse_fn, write_struct, UNIT_ALLOWS};
use crate::context::{DomainContext, InlineOwner};
use crate::rust_types::Scope;
use crate::utils::{field_ident, string_literal, type_ident};
use crate::{CodeGenerator, Result};

/// Renders one item per declared type, in declaration order, followed by the
/// domain's `TypeValue` mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypesGenerator;

impl CodeGenerator for TypesGenerator {
    fn generate(&self, ctx: &DomainContext<'_>) -> Result<Vec<(String, String)>> {
        let domain = ctx.domain;
        let mut out = String::new();
        write_module_docs(
            &mut out,
            &format!("Types of the `{}` domain.", domain.name),
            ItemDocs::text(crate::GENERATED_NOTICE),
        )?;
        writeln!(out, "{}", UNIT_ALLOWS)?;

        for ty in &domain.types {
            writeln!(out)?;
            write_type(&mut out, ctx, ty)?;
        }

        writeln!(out)?;
        write_type_value(&mut out, ctx)?;

        Ok(vec![("types.rs".to_string(), out)])
    }
}

fn write_type(out: &mut String, ctx: &DomainContext<'_>, ty: &ResolvedType) -> Result<()> {
    let name = type_ident(&ty.name);
    let docs = ItemDocs::new(ty.description.as_deref(), ty.experimental, ty.deprecated);

    match &ty.shape {
        TypeShape::Alias(target) => {
            docs.write(out, "")?;
            writeln!(out, "pub type {} = {};", name, ctx.render(target, Scope::Types))?;
        }
        TypeShape::Enum(values) => write_enum(out, &name, docs, values)?,
        TypeShape::Object(props) => {
            let owner = InlineOwner::Type(ty.name.clone());
            write_struct(out, ctx, Scope::Types, &owner, &name, docs, props)?;
            writeln!(out)?;

            let (required, optional): (Vec<_>, Vec<_>) = props.iter().partition(|p| !p.optional);
            let args = required
                .iter()
                .chain(optional.iter())
                .map(|p| {
                    format!("{}: {}", field_ident(&p.name), ctx.field_type(&owner, p, Scope::Types))
                })
                .collect::<Vec<_>>()
                .join(", ");
            let fields = props.iter().map(|p| field_ident(&p.name)).collect::<Vec<_>>().join(", ");

            writeln!(out, "impl {} {{", name)?;
            writeln!(out, "    /// Build from every field, required ones first.")?;
            writeln!(out, "    pub fn new({}) -> Self {{", args)?;
            writeln!(out, "        Self {{ {} }}", fields)?;
            writeln!(out, "    }}")?;
            writeln!(out)?;
            write_parse_fn(out)?;
            writeln!(out, "}}")?;

            write_inline_enums(out, ctx, &owner, props)?;
        }
    }
    Ok(())
}

/// `TypeValue`, `TYPE_NAMES` and `decode_type`: from a schema type id to a
/// best-effort typed value.
fn write_type_value(out: &mut String, ctx: &DomainContext<'_>) -> Result<()> {
    let domain = ctx.domain;

    writeln!(out, "/// Any named type of the `{}` domain.", domain.name)?;
    writeln!(out, "#[derive(Debug, Clone, PartialEq)]")?;
    writeln!(out, "pub enum {} {{", ctx.type_value())?;
    for ty in &domain.types {
        let name = type_ident(&ty.name);
        writeln!(out, "    {}({}),", name, name)?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;

    let names = domain.types.iter().map(|t| string_literal(&t.name)).collect::<Vec<_>>().join(", ");
    writeln!(out, "/// Schema ids of the domain's types, in declaration order.")?;
    writeln!(out, "pub const TYPE_NAMES: &[&str] = &[{}];", names)?;
    writeln!(out)?;

    writeln!(out, "/// Decode `value` as the type with schema id `name`.")?;
    writeln!(out, "///")?;
    writeln!(out, "/// Returns `None` for an unknown name.")?;
    let returns = format!("Option<transport::Lenient<{}>>", ctx.type_value());
    writeln!(out, "pub fn decode_type(name: &str, value: serde_json::Value) -> {} {{", returns)?;
    if domain.types.is_empty() {
        writeln!(out, "    let _ = (name, value);")?;
        writeln!(out, "    None")?;
    } else {
        writeln!(out, "    match name {{")?;
        for ty in &domain.types {
            let name = type_ident(&ty.name);
            writeln!(
                out,
                "        {} => Some(transport::Lenient::<{}>::decode(value).map({}::{})),",
                string_literal(&ty.name),
                name,
                ctx.type_value(),
                name
            )?;
        }
        writeln!(out, "        _ => None,")?;
        writeln!(out, "    }}")?;
    }
    writeln!(out, "}}")?;
    Ok(())
}
