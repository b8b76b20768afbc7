//! `events.rs`: event payloads of a domain.
//!
//! Domains without events still get `DomainEvent`, `EVENT_NAMES` and
//! `decode_event`; the enum is simply uninhabited.

use std::fmt::Write as _;

use super::doc_comment::{write_module_docs, ItemDocs};
use super::{write_inline_enums, write_struct, UNIT_ALLOWS};
use crate::context::{DomainContext, InlineOwner};
use crate::rust_types::Scope;
use crate::utils::string_literal;
use crate::{CodeGenerator, Result};

/// Renders one payload struct per event plus the `DomainEvent` dispatch enum.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventsGenerator;

impl CodeGenerator for EventsGenerator {
    fn generate(&self, ctx: &DomainContext<'_>) -> Result<Vec<(String, String)>> {
        let domain = ctx.domain;
        let mut out = String::new();
        write_module_docs(
            &mut out,
            &format!("Events of the `{}` domain.", domain.name),
            ItemDocs::text(crate::GENERATED_NOTICE),
        )?;
        writeln!(out, "{}", UNIT_ALLOWS)?;

        for event in &domain.events {
            let owner = InlineOwner::Event(event.name.clone());
            let name = ctx.event_struct(&event.name);
            let docs =
                ItemDocs::new(event.description.as_deref(), event.experimental, event.deprecated);

            writeln!(out)?;
            write_struct(&mut out, ctx, Scope::Sibling, &owner, &name, docs, &event.parameters)?;
            writeln!(out)?;
            writeln!(out, "impl transport::EventPayload for {} {{", name)?;
            let method = string_literal(&event.method(&domain.name));
            writeln!(out, "    const NAME: &'static str = {};", method)?;
            writeln!(out, "}}")?;
            write_inline_enums(&mut out, ctx, &owner, &event.parameters)?;
        }

        writeln!(out)?;
        write_domain_event(&mut out, ctx)?;

        Ok(vec![("events.rs".to_string(), out)])
    }
}

fn write_domain_event(out: &mut String, ctx: &DomainContext<'_>) -> Result<()> {
    let domain = ctx.domain;

    writeln!(out, "/// Any event of the `{}` domain.", domain.name)?;
    writeln!(out, "#[derive(Debug, Clone, PartialEq)]")?;
    writeln!(out, "pub enum DomainEvent {{")?;
    for event in &domain.events {
        let (variant, payload) = (ctx.event_variant(&event.name), ctx.event_struct(&event.name));
        writeln!(out, "    {}({}),", variant, payload)?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "impl DomainEvent {{")?;
    writeln!(out, "    /// Wire name of the event.")?;
    writeln!(out, "    pub fn name(&self) -> &'static str {{")?;
    if domain.events.is_empty() {
        writeln!(out, "        match *self {{}}")?;
    } else {
        writeln!(out, "        match self {{")?;
        for event in &domain.events {
            writeln!(
                out,
                "            DomainEvent::{}(_) => {},",
                ctx.event_variant(&event.name),
                string_literal(&event.method(&domain.name))
            )?;
        }
        writeln!(out, "        }}")?;
    }
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    let names = domain
        .events
        .iter()
        .map(|e| string_literal(&e.method(&domain.name)))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(out, "/// Wire names of the domain's events, in declaration order.")?;
    writeln!(out, "pub const EVENT_NAMES: &[&str] = &[{}];", names)?;
    writeln!(out)?;

    writeln!(out, "/// Decode the `params` of the event with wire name `name`.")?;
    writeln!(out, "///")?;
    writeln!(out, "/// Returns `None` when the event does not belong to this domain.")?;
    write!(out, "pub fn decode_event(name: &str, params: &serde_json::Value) -> ")?;
    writeln!(out, "Option<transport::Lenient<DomainEvent>> {{")?;
    if domain.events.is_empty() {
        writeln!(out, "    let _ = (name, params);")?;
        writeln!(out, "    None")?;
    } else {
        writeln!(out, "    match name {{")?;
        for event in &domain.events {
            let variant = format!("DomainEvent::{}", ctx.event_variant(&event.name));
            writeln!(
                out,
                "        {} => Some(<{} as transport::EventPayload>::parse(params).map({})),",
                string_literal(&event.method(&domain.name)),
                ctx.event_struct(&event.name),
                variant
            )?;
        }
        writeln!(out, "        _ => None,")?;
        writeln!(out, "    }}")?;
    }
    writeln!(out, "}}")?;
    Ok(())
}
