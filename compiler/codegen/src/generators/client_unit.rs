//! `client.rs`: the command client of a domain.

use std::fmt::Write as _;

use ir::{ResolvedCommand, ResolvedEvent};

use super::doc_comment::{write_module_docs, ItemDocs};
use super::{write_inline_enums, write_parse_fn, write_struct, UNIT_ALLOWS};
use crate::context::{DomainContext, InlineOwner};
use crate::rust_types::Scope;
use crate::utils::{field_ident, snake_case, string_literal};
use crate::{CodeGenerator, Result};

/// Renders `Client` with one async method per command and one subscription
/// method per event, plus a `{Command}Returns` struct per command with returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientGenerator;

impl CodeGenerator for ClientGenerator {
    fn generate(&self, ctx: &DomainContext<'_>) -> Result<Vec<(String, String)>> {
        let domain = ctx.domain;
        let mut out = String::new();
        write_module_docs(
            &mut out,
            &format!("Client for the `{}` domain.", domain.name),
            ItemDocs::text(crate::GENERATED_NOTICE),
        )?;
        writeln!(out, "{}", UNIT_ALLOWS)?;
        writeln!(out)?;

        ItemDocs::new(domain.description.as_deref(), domain.experimental, domain.deprecated)
            .write(&mut out, "")?;
        writeln!(out, "#[derive(Clone)]")?;
        writeln!(out, "pub struct Client {{")?;
        writeln!(out, "    transport: transport::DynTransport,")?;
        writeln!(out, "}}")?;
        writeln!(out)?;

        writeln!(out, "impl std::fmt::Debug for Client {{")?;
        writeln!(out, "    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {{")?;
        write!(out, "        f.debug_struct(\"Client\")")?;
        writeln!(out, ".field(\"endpoint\", &self.transport.endpoint()).finish()")?;
        writeln!(out, "    }}")?;
        writeln!(out, "}}")?;
        writeln!(out)?;

        writeln!(out, "impl Client {{")?;
        writeln!(out, "    /// Client over `transport`.")?;
        writeln!(out, "    pub fn new(transport: transport::DynTransport) -> Self {{")?;
        writeln!(out, "        Self {{ transport }}")?;
        writeln!(out, "    }}")?;
        writeln!(out)?;
        writeln!(out, "    /// The transport commands are sent over.")?;
        writeln!(out, "    pub fn transport(&self) -> &transport::DynTransport {{")?;
        writeln!(out, "        &self.transport")?;
        writeln!(out, "    }}")?;

        for command in &domain.commands {
            writeln!(out)?;
            write_command(&mut out, ctx, command)?;
        }
        for event in &domain.events {
            writeln!(out)?;
            write_subscription(&mut out, ctx, event)?;
        }
        writeln!(out, "}}")?;

        for command in &domain.commands {
            write_inline_enums(
                &mut out,
                ctx,
                &InlineOwner::Command(command.name.clone()),
                &command.parameters,
            )?;
            if command.has_returns() {
                let owner = InlineOwner::Returns(command.name.clone());
                let name = ctx.returns_struct(&command.name);
                let doc = format!("Return values of `{}`.", command.method(&domain.name));

                writeln!(out)?;
                let docs = ItemDocs::text(&doc);
                write_struct(&mut out, ctx, Scope::Sibling, &owner, &name, docs, &command.returns)?;
                writeln!(out)?;
                writeln!(out, "impl {} {{", name)?;
                write_parse_fn(&mut out)?;
                writeln!(out, "}}")?;
                write_inline_enums(&mut out, ctx, &owner, &command.returns)?;
            }
        }

        Ok(vec![("client.rs".to_string(), out)])
    }
}

/// One async method: build the payload, send, decode the returns.
fn write_command(
    out: &mut String,
    ctx: &DomainContext<'_>,
    command: &ResolvedCommand,
) -> Result<()> {
    let owner = InlineOwner::Command(command.name.clone());
    let method = command.method(&ctx.domain.name);

    let mut docs = String::new();
    ItemDocs::new(command.description.as_deref(), command.experimental, command.deprecated)
        .write(&mut docs, "    ")?;
    if !docs.is_empty() {
        out.push_str(&docs);
        writeln!(out, "    ///")?;
    }
    writeln!(out, "    /// Sends `{}`.", method)?;

    let returns = if command.has_returns() {
        format!("transport::Lenient<{}>", ctx.returns_struct(&command.name))
    } else {
        "()".to_string()
    };

    if command.parameters.is_empty() {
        writeln!(
            out,
            "    pub async fn {}(&self) -> transport::Result<{}> {{",
            field_ident(&command.name),
            returns
        )?;
        writeln!(out, "        let params = transport::Params::new().into_map();")?;
    } else {
        writeln!(out, "    pub async fn {}(", field_ident(&command.name))?;
        writeln!(out, "        &self,")?;
        for param in &command.parameters {
            writeln!(
                out,
                "        {}: {},",
                field_ident(&param.name),
                ctx.field_type(&owner, param, Scope::Sibling)
            )?;
        }
        writeln!(out, "    ) -> transport::Result<{}> {{", returns)?;
        writeln!(out, "        let params = transport::Params::new()")?;
        for param in &command.parameters {
            let setter = if param.optional { "optional" } else { "required" };
            writeln!(
                out,
                "            .{}({}, {})?",
                setter,
                string_literal(&param.name),
                field_ident(&param.name)
            )?;
        }
        writeln!(out, "            .into_map();")?;
    }

    let method = string_literal(&method);
    if command.has_returns() {
        writeln!(out, "        let result = self.transport.send({}, params).await?;", method)?;
        writeln!(out, "        Ok(transport::Lenient::decode(result))")?;
    } else {
        writeln!(out, "        self.transport.send({}, params).await?;", method)?;
        writeln!(out, "        Ok(())")?;
    }
    writeln!(out, "    }}")?;
    Ok(())
}

/// `on_{event}`: register a typed handler through `Transport::on`.
fn write_subscription(
    out: &mut String,
    ctx: &DomainContext<'_>,
    event: &ResolvedEvent,
) -> Result<()> {
    let payload = format!("super::events::{}", ctx.event_struct(&event.name));
    let method = event.method(&ctx.domain.name);

    writeln!(out, "    /// Subscribe to `{}`.", method)?;
    writeln!(out, "    ///")?;
    writeln!(out, "    /// A `once` handler is removed before its first invocation.")?;
    writeln!(
        out,
        "    pub fn on_{}<F>(&self, handler: F, once: bool) -> transport::HandlerId",
        snake_case(&event.name)
    )?;
    writeln!(out, "    where")?;
    writeln!(out, "        F: Fn(transport::Lenient<{}>) + Send + Sync + 'static,", payload)?;
    writeln!(out, "    {{")?;
    write!(out, "        let callback: transport::EventHandler = ")?;
    writeln!(out, "std::sync::Arc::new(move |params: &serde_json::Value| {{")?;
    writeln!(out, "            handler(<{} as transport::EventPayload>::parse(params))", payload)?;
    writeln!(out, "        }});")?;
    writeln!(out, "        self.transport.on({}, callback, once)", string_literal(&method))?;
    writeln!(out, "    }}")?;
    Ok(())
}
