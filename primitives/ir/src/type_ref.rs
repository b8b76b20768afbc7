//! Structural type references.
//!
//! A [`TypeRef`] is what a raw descriptor becomes once resolved. Named references
//! are kept as name keys (`LocalRef`, `ForeignRef`) and looked up against the
//! model; the `"Domain.Type"` spelling is split exactly once, by the resolver.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Primitive schema keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    /// `string`
    String,
    /// `integer`
    Integer,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `object` without declared properties
    Object,
    /// `any`
    Any,
}

impl Primitive {
    /// Map a schema keyword to a primitive. `array` is not a primitive.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "string" => Some(Primitive::String),
            "integer" => Some(Primitive::Integer),
            "number" => Some(Primitive::Number),
            "boolean" => Some(Primitive::Boolean),
            "object" => Some(Primitive::Object),
            "any" => Some(Primitive::Any),
            _ => None,
        }
    }

    /// The schema keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Integer => "integer",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Object => "object",
            Primitive::Any => "any",
        }
    }
}

/// A resolved type reference.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    /// A primitive keyword.
    Primitive(Primitive),
    /// An array of the element type.
    ArrayOf(Box<TypeRef>),
    /// A named type in the owning domain.
    LocalRef(String),
    /// A named type qualified by domain: `(domain, type)`.
    ForeignRef(String, String),
}

/// A query was made that is not defined for the given variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{query} is not defined for {found}")]
pub struct InvalidQuery {
    /// The query that was attempted.
    pub query: &'static str,
    /// Rendering of the reference it was attempted on.
    pub found: String,
}

impl TypeRef {
    /// Shorthand for `ArrayOf`.
    pub fn array_of(element: TypeRef) -> Self { TypeRef::ArrayOf(Box::new(element)) }

    /// Shorthand for `LocalRef`.
    pub fn local(name: impl Into<String>) -> Self { TypeRef::LocalRef(name.into()) }

    /// Shorthand for `ForeignRef`.
    pub fn foreign(domain: impl Into<String>, name: impl Into<String>) -> Self {
        TypeRef::ForeignRef(domain.into(), name.into())
    }

    /// Whether this is a primitive.
    pub fn is_primitive(&self) -> bool { matches!(self, TypeRef::Primitive(_)) }

    /// Whether this is an array.
    pub fn is_array(&self) -> bool { matches!(self, TypeRef::ArrayOf(_)) }

    /// Whether this is a domain-qualified reference.
    pub fn is_foreign_ref(&self) -> bool { matches!(self, TypeRef::ForeignRef(..)) }

    /// Domain named by a `ForeignRef`.
    pub fn foreign_domain_name(&self) -> Result<&str, InvalidQuery> {
        match self {
            TypeRef::ForeignRef(domain, _) => Ok(domain),
            other => Err(InvalidQuery { query: "foreign_domain_name", found: other.to_string() }),
        }
    }

    /// Element type of an array.
    pub fn element_type(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::ArrayOf(element) => Some(element),
            _ => None,
        }
    }

    /// Type name of a local or foreign reference.
    pub fn referenced_name(&self) -> Option<&str> {
        match self {
            TypeRef::LocalRef(name) | TypeRef::ForeignRef(_, name) => Some(name),
            _ => None,
        }
    }

    /// `(domain, type)` that a reference points at, treating local references as
    /// belonging to `owning_domain`.
    pub fn target<'a>(&'a self, owning_domain: &'a str) -> Option<(&'a str, &'a str)> {
        match self {
            TypeRef::LocalRef(name) => Some((owning_domain, name)),
            TypeRef::ForeignRef(domain, name) => Some((domain, name)),
            _ => None,
        }
    }

    /// Whether a reference resolves inside `owning_domain`, including a
    /// `ForeignRef` that spells out the owning domain.
    pub fn is_local_to(&self, owning_domain: &str) -> bool {
        match self {
            TypeRef::LocalRef(_) => true,
            TypeRef::ForeignRef(domain, _) => domain == owning_domain,
            _ => false,
        }
    }

    /// Strip any number of array layers.
    pub fn innermost(&self) -> &TypeRef {
        let mut current = self;
        while let TypeRef::ArrayOf(element) = current {
            current = element;
        }
        current
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => f.write_str(p.keyword()),
            TypeRef::ArrayOf(element) => write!(f, "array<{}>", element),
            TypeRef::LocalRef(name) => f.write_str(name),
            TypeRef::ForeignRef(domain, name) => write!(f, "{}.{}", domain, name),
        }
    }
}
