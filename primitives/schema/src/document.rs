//! Raw schema structures as they appear in the CDP JSON documents.

use serde::{Deserialize, Serialize};

use crate::version::ProtocolVersion;

/// The loaded protocol: every domain of every input document, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolDocument {
    /// Version of the first input document.
    pub version: ProtocolVersion,
    /// All domains, browser protocol first.
    pub domains: Vec<DomainSpec>,
}

impl ProtocolDocument {
    /// Look up a domain by name.
    pub fn domain(&self, name: &str) -> Option<&DomainSpec> {
        self.domains.iter().find(|d| d.name == name)
    }

    /// Whether a domain with this name exists.
    pub fn contains_domain(&self, name: &str) -> bool { self.domain(name).is_some() }

    /// Domain names in declaration order.
    pub fn domain_names(&self) -> Vec<&str> {
        self.domains.iter().map(|d| d.name.as_str()).collect()
    }
}

/// One protocol domain (`Page`, `Network`, `Runtime`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSpec {
    /// Domain name, unique across the document.
    #[serde(rename = "domain")]
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
    /// Declared dependencies on other domains.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Named types.
    #[serde(default)]
    pub types: Vec<TypeSpec>,
    /// Commands.
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
    /// Events.
    #[serde(default)]
    pub events: Vec<EventSpec>,
}

impl DomainSpec {
    /// Look up a named type.
    pub fn type_spec(&self, id: &str) -> Option<&TypeSpec> {
        self.types.iter().find(|t| t.id == id)
    }

    /// Look up a command.
    pub fn command(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Look up an event.
    pub fn event(&self, name: &str) -> Option<&EventSpec> {
        self.events.iter().find(|e| e.name == name)
    }
}

/// A raw type descriptor: `{"$ref"?, "type"?, "items"?, "enum"?}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Reference to a named type, `"Type"` or `"Domain.Type"`.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Primitive keyword (`string`, `integer`, `number`, `boolean`, `object`, `any`, `array`).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Element descriptor for arrays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<TypeDescriptor>>,
    /// Closed set of string literals.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl TypeDescriptor {
    /// Descriptor for a primitive keyword.
    pub fn primitive(kind: &str) -> Self {
        Self { kind: Some(kind.to_string()), ..Self::default() }
    }

    /// Descriptor for a `$ref`.
    pub fn of_ref(target: &str) -> Self {
        Self { reference: Some(target.to_string()), ..Self::default() }
    }

    /// Descriptor for an array of `items`.
    pub fn array(items: TypeDescriptor) -> Self {
        Self { kind: Some("array".to_string()), items: Some(Box::new(items)), ..Self::default() }
    }
}

/// A named type declared by a domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSpec {
    /// Type name, unique within its domain.
    pub id: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the type is deprecated.
    #[serde(default)]
    pub deprecated: bool,
    /// Whether the type is experimental.
    #[serde(default)]
    pub experimental: bool,
    /// Underlying descriptor (primitive, array, enum or object).
    #[serde(flatten)]
    pub descriptor: TypeDescriptor,
    /// Ordered object properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<ParamSpec>>,
}

/// A property, command parameter, command return value or event parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Wire name.
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the value may be absent.
    #[serde(default)]
    pub optional: bool,
    /// Whether the value is deprecated.
    #[serde(default)]
    pub deprecated: bool,
    /// Whether the value is experimental.
    #[serde(default)]
    pub experimental: bool,
    /// Type of the value.
    #[serde(flatten)]
    pub descriptor: TypeDescriptor,
}

/// A command (`Domain.method`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Command name, unique within its domain.
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
    #[serde(default)]
    pub parameters: Vec<ParamSpec>,
    /// Ordered return values.
    #[serde(default)]
    pub returns: Vec<ParamSpec>,
}

/// An event (`Domain.event`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSpec {
    /// Event name, unique within its domain.
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
    #[serde(default)]
    pub parameters: Vec<ParamSpec>,
}
