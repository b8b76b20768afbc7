//! Resolved protocol model
//!
//! One [`DomainModel`] per CDP domain, with every descriptor resolved to a
//! [`TypeRef`] and the dependency set computed. [`ProtocolModel`] keeps domains in
//! declaration order and separately records the emission order.

use std::collections::BTreeSet;

use schema::ProtocolVersion;
use serde::{Deserialize, Serialize};

use crate::type_ref::TypeRef;

/// The resolved protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolModel {
    /// Protocol version of the first input document.
    pub version: ProtocolVersion,
    /// Domains in declaration order.
    pub domains: Vec<DomainModel>,
    /// Domain names in emission order.
    pub order: Vec<String>,
}

/// A resolved domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainModel {
    /// Domain name.
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the domain is deprecated.
    #[serde(default)]
    pub deprecated: bool,
    /// Whether the domain is experimental.
    #[serde(default)]
    pub experimental: bool,
    /// Dependencies as declared by the schema, verbatim.
    pub declared_dependencies: Vec<String>,
    /// Declared dependencies plus every domain referenced through a `ForeignRef`.
    pub dependencies: BTreeSet<String>,
    /// Named types in declaration order.
    pub types: Vec<ResolvedType>,
    /// Commands in declaration order.
    pub commands: Vec<ResolvedCommand>,
    /// Events in declaration order.
    pub events: Vec<ResolvedEvent>,
}

/// A resolved named type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedType {
    /// Type name.
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the type is deprecated.
    #[serde(default)]
    pub deprecated: bool,
    /// Whether the type is experimental.
    #[serde(default)]
    pub experimental: bool,
    /// What the type is.
    pub shape: TypeShape,
}

/// The shape of a named type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeShape {
    /// Alias of a primitive, an array, a property-less object or another named type.
    Alias(TypeRef),
    /// Closed set of string literals.
    Enum(Vec<String>),
    /// Object with ordered properties.
    Object(Vec<ResolvedParam>),
}

/// A resolved property or parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedParam {
    /// Wire name.
    pub name: String,
    /// Resolved type.
    pub ty: TypeRef,
    /// Whether the value may be absent.
    #[serde(default)]
    pub optional: bool,
    /// Inline enum literals, if the value is a string restricted to a closed set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the value is deprecated.
    #[serde(default)]
    pub deprecated: bool,
    /// Whether the value is experimental.
    #[serde(default)]
    pub experimental: bool,
}

/// A resolved command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCommand {
    /// Command name.
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the command is deprecated.
    #[serde(default)]
    pub deprecated: bool,
    /// Whether the command is experimental.
    #[serde(default)]
    pub experimental: bool,
    /// Ordered parameters.
    pub parameters: Vec<ResolvedParam>,
    /// Ordered return values.
    pub returns: Vec<ResolvedParam>,
}

/// A resolved event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEvent {
    /// Event name.
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the event is deprecated.
    #[serde(default)]
    pub deprecated: bool,
    /// Whether the event is experimental.
    #[serde(default)]
    pub experimental: bool,
    /// Ordered parameters.
    pub parameters: Vec<ResolvedParam>,
}

impl ProtocolModel {
    /// Get a domain by name.
    pub fn domain(&self, name: &str) -> Option<&DomainModel> {
        self.domains.iter().find(|d| d.name == name)
    }

    /// Domains in emission order.
    pub fn ordered_domains(&self) -> impl Iterator<Item = &DomainModel> + '_ {
        self.order.iter().filter_map(move |name| self.domain(name))
    }

    /// Total number of named types across all domains.
    pub fn type_count(&self) -> usize { self.domains.iter().map(|d| d.types.len()).sum() }

    /// Total number of commands across all domains.
    pub fn command_count(&self) -> usize { self.domains.iter().map(|d| d.commands.len()).sum() }

    /// Total number of events across all domains.
    pub fn event_count(&self) -> usize { self.domains.iter().map(|d| d.events.len()).sum() }

    /// Load a model from a JSON file.
    pub fn from_file(path: &std::path::Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save the model to a JSON file with pretty formatting.
    pub fn to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(&mut file, self)?;
        use std::io::Write;
        writeln!(file)?;
        Ok(())
    }
}

impl DomainModel {
    /// Get a named type.
    pub fn type_def(&self, name: &str) -> Option<&ResolvedType> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Get a command.
    pub fn command(&self, name: &str) -> Option<&ResolvedCommand> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Get an event.
    pub fn event(&self, name: &str) -> Option<&ResolvedEvent> {
        self.events.iter().find(|e| e.name == name)
    }

    /// Whether the domain declares no events.
    pub fn has_events(&self) -> bool { !self.events.is_empty() }
}

impl ResolvedType {
    /// Properties of an object type; empty for other shapes.
    pub fn properties(&self) -> &[ResolvedParam] {
        match &self.shape {
            TypeShape::Object(props) => props,
            _ => &[],
        }
    }
}

impl ResolvedParam {
    /// Whether the value carries its own inline enum.
    pub fn has_inline_enum(&self) -> bool { self.enum_values.is_some() }
}

impl ResolvedCommand {
    /// Wire method name, `Domain.command`.
    pub fn method(&self, domain: &str) -> String { format!("{}.{}", domain, self.name) }

    /// Whether the command returns any values.
    pub fn has_returns(&self) -> bool { !self.returns.is_empty() }
}

impl ResolvedEvent {
    /// Wire event name, `Domain.event`.
    pub fn method(&self, domain: &str) -> String { format!("{}.{}", domain, self.name) }
}
