//! Per-domain rendering context.
//!
//! Fixes every generated item name of a domain up front, so all units of the
//! domain agree on them and collisions are resolved the same way on every run.

use std::collections::{BTreeMap, BTreeSet};

use ir::{DomainModel, Primitive, ProtocolModel, ResolvedParam, TypeRef, TypeShape};

use crate::rust_types::{render_type, RecursionIndex, Scope};
use crate::utils::{module_dir, module_ident, type_ident, unique_name};

/// Items generated next to event payloads and return structs.
const RESERVED_NAMES: &[&str] = &["DomainEvent", "Client"];

/// What an inline enum is declared on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum InlineOwner {
    /// A property of a named object type.
    Type(String),
    /// A command parameter.
    Command(String),
    /// A command return value.
    Returns(String),
    /// An event parameter.
    Event(String),
}

/// Literals of an inline enum, when the parameter carries one.
///
/// Only string-typed parameters get an enum; anything else keeps its plain type.
pub fn inline_enum_values(param: &ResolvedParam) -> Option<&[String]> {
    match (&param.enum_values, &param.ty) {
        (Some(values), TypeRef::Primitive(Primitive::String)) => Some(values),
        _ => None,
    }
}

/// Everything a unit generator needs to render one domain.
#[derive(Debug)]
pub struct DomainContext<'a> {
    /// The whole model, for version and cross-domain lookups.
    pub model: &'a ProtocolModel,
    /// The domain being rendered.
    pub domain: &'a DomainModel,
    recursion: &'a RecursionIndex,
    type_value: String,
    inline_enums: BTreeMap<(InlineOwner, String), String>,
    returns_structs: BTreeMap<String, String>,
    event_structs: BTreeMap<String, String>,
    event_variants: BTreeMap<String, String>,
}

impl<'a> DomainContext<'a> {
    /// Plan the names of `domain`.
    pub fn new(
        model: &'a ProtocolModel,
        domain: &'a DomainModel,
        recursion: &'a RecursionIndex,
    ) -> Self {
        let mut taken: BTreeSet<String> =
            domain.types.iter().map(|t| type_ident(&t.name)).collect();
        let type_value = unique_name("TypeValue", &mut taken);
        taken.extend(RESERVED_NAMES.iter().map(|n| n.to_string()));
        let mut inline_enums = BTreeMap::new();

        for ty in &domain.types {
            if let TypeShape::Object(props) = &ty.shape {
                let owner = InlineOwner::Type(ty.name.clone());
                claim_inline_enums(&mut inline_enums, &mut taken, &owner, &ty.name, props);
            }
        }

        let mut returns_structs = BTreeMap::new();
        for command in &domain.commands {
            let owner = InlineOwner::Command(command.name.clone());
            let params = &command.parameters;
            claim_inline_enums(&mut inline_enums, &mut taken, &owner, &command.name, params);
            if command.has_returns() {
                let wanted = format!("{}Returns", type_ident(&command.name));
                let name = unique_name(&wanted, &mut taken);
                returns_structs.insert(command.name.clone(), name);
            }
            let owner = InlineOwner::Returns(command.name.clone());
            let returns = &command.returns;
            claim_inline_enums(&mut inline_enums, &mut taken, &owner, &command.name, returns);
        }

        let mut event_structs = BTreeMap::new();
        let mut event_variants = BTreeMap::new();
        let mut variants_taken = BTreeSet::new();
        for event in &domain.events {
            let name = unique_name(&format!("{}Event", type_ident(&event.name)), &mut taken);
            event_structs.insert(event.name.clone(), name);
            let variant = unique_name(&type_ident(&event.name), &mut variants_taken);
            event_variants.insert(event.name.clone(), variant);
            let owner = InlineOwner::Event(event.name.clone());
            let params = &event.parameters;
            claim_inline_enums(&mut inline_enums, &mut taken, &owner, &event.name, params);
        }

        Self {
            model,
            domain,
            recursion,
            type_value,
            inline_enums,
            returns_structs,
            event_structs,
            event_variants,
        }
    }

    /// Name of the enum over every declared type, `TypeValue` unless a
    /// declared type already uses it.
    pub fn type_value(&self) -> &str { &self.type_value }

    /// Directory of the domain's module, relative to the output root.
    pub fn module_dir(&self) -> String { module_dir(&self.domain.name) }

    /// Identifier of the domain's module.
    pub fn module_ident(&self) -> String { module_ident(&self.domain.name) }

    /// Name of the inline enum on `param` of `owner`, if it has one.
    pub fn inline_enum(&self, owner: &InlineOwner, param: &str) -> Option<&str> {
        self.inline_enums.get(&(owner.clone(), param.to_string())).map(String::as_str)
    }

    /// Name of the struct holding a command's return values.
    pub fn returns_struct(&self, command: &str) -> String {
        self.returns_structs
            .get(command)
            .cloned()
            .unwrap_or_else(|| format!("{}Returns", type_ident(command)))
    }

    /// Name of an event's payload struct.
    pub fn event_struct(&self, event: &str) -> String {
        self.event_structs
            .get(event)
            .cloned()
            .unwrap_or_else(|| format!("{}Event", type_ident(event)))
    }

    /// Variant of `DomainEvent` for an event.
    pub fn event_variant(&self, event: &str) -> String {
        self.event_variants.get(event).cloned().unwrap_or_else(|| type_ident(event))
    }

    /// Render a plain type as seen from `scope`.
    pub fn render(&self, ty: &TypeRef, scope: Scope) -> String {
        render_type(ty, &self.domain.name, scope)
    }

    /// Full field type of `param`: inline enum or rendered type, boxed when it
    /// closes a by-value cycle, wrapped in `Option` when optional.
    pub fn field_type(&self, owner: &InlineOwner, param: &ResolvedParam, scope: Scope) -> String {
        let base = match self.inline_enum(owner, &param.name) {
            Some(name) => name.to_string(),
            None => self.render(&param.ty, scope),
        };
        let boxed = match owner {
            InlineOwner::Type(type_name) => {
                self.recursion.needs_box(&self.domain.name, type_name, &param.ty)
            }
            _ => false,
        };
        let base = if boxed { format!("Box<{}>", base) } else { base };
        if param.optional {
            format!("Option<{}>", base)
        } else {
            base
        }
    }
}

fn claim_inline_enums(
    inline_enums: &mut BTreeMap<(InlineOwner, String), String>,
    taken: &mut BTreeSet<String>,
    owner: &InlineOwner,
    owner_name: &str,
    params: &[ResolvedParam],
) {
    for param in params.iter().filter(|p| inline_enum_values(p).is_some()) {
        let base = format!("{}{}", type_ident(owner_name), type_ident(&param.name));
        inline_enums.insert((owner.clone(), param.name.clone()), unique_name(&base, taken));
    }
}
