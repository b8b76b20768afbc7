//! `mod.rs` files: one per domain and the root listing every domain.

use std::fmt::Write as _;

use ir::ProtocolModel;

use super::doc_comment::{write_module_docs, ItemDocs};
use crate::context::DomainContext;
use crate::utils::{module_ident, string_literal};
use crate::{CodeGenerator, Result};

/// Renders a domain's `mod.rs`, re-exporting its three units.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainModGenerator;

impl CodeGenerator for DomainModGenerator {
    fn generate(&self, ctx: &DomainContext<'_>) -> Result<Vec<(String, String)>> {
        let domain = ctx.domain;
        let mut out = String::new();
        write_module_docs(
            &mut out,
            &format!("The `{}` domain.", domain.name),
            ItemDocs::new(domain.description.as_deref(), domain.experimental, domain.deprecated),
        )?;
        writeln!(out)?;
        writeln!(out, "pub mod client;")?;
        writeln!(out, "pub mod events;")?;
        writeln!(out, "pub mod types;")?;
        writeln!(out)?;
        writeln!(out, "pub use client::Client;")?;
        writeln!(out, "pub use events::{{decode_event, DomainEvent, EVENT_NAMES}};")?;
        writeln!(out, "pub use types::{{decode_type, {}, TYPE_NAMES}};", ctx.type_value())?;
        writeln!(out)?;

        let dependencies = domain
            .dependencies
            .iter()
            .map(|d| string_literal(d))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "/// Wire name of the domain.")?;
        writeln!(out, "pub const DOMAIN: &str = {};", string_literal(&domain.name))?;
        writeln!(out)?;
        writeln!(out, "/// Domains whose types this domain uses or declares a dependency on.")?;
        writeln!(out, "pub const DEPENDENCIES: &[&str] = &[{}];", dependencies)?;

        Ok(vec![("mod.rs".to_string(), out)])
    }
}

/// Render the root `mod.rs`: every domain module in emission order.
pub fn render_root_mod(model: &ProtocolModel) -> Result<String> {
    let mut out = String::new();
    write_module_docs(
        &mut out,
        &format!("Chrome DevTools Protocol bindings, protocol version {}.", model.version),
        ItemDocs::text(crate::GENERATED_NOTICE),
    )?;
    writeln!(out)?;
    for name in &model.order {
        writeln!(out, "pub mod {};", module_ident(name))?;
    }
    writeln!(out)?;

    let domains = model.order.iter().map(|d| string_literal(d)).collect::<Vec<_>>().join(", ");
    writeln!(out, "/// Protocol version the bindings were generated from.")?;
    let version = string_literal(&model.version.to_string());
    writeln!(out, "pub const PROTOCOL_VERSION: &str = {};", version)?;
    writeln!(out)?;
    writeln!(out, "/// Domain names in emission order.")?;
    writeln!(out, "pub const DOMAINS: &[&str] = &[{}];", domains)?;
    Ok(out)
}
