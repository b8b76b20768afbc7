//! Rust type expressions for resolved [`TypeRef`]s.

use std::collections::{BTreeMap, BTreeSet};

use ir::{Primitive, ProtocolModel, TypeRef, TypeShape};

use crate::utils::{module_ident, type_ident};

/// Which generated unit a type expression is written into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// `types.rs` of the domain: local types are in scope by name.
    Types,
    /// `events.rs` or `client.rs`: local types live in `super::types`.
    Sibling,
}

/// Rust spelling of a primitive.
pub fn primitive_type(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::String => "String",
        Primitive::Integer => "i64",
        Primitive::Number => "f64",
        Primitive::Boolean => "bool",
        Primitive::Object => "serde_json::Map<String, serde_json::Value>",
        Primitive::Any => "serde_json::Value",
    }
}

/// Render `ty` as seen from a unit of `domain`.
///
/// A `ForeignRef` that names `domain` itself renders like a local reference.
pub fn render_type(ty: &TypeRef, domain: &str, scope: Scope) -> String {
    match ty {
        TypeRef::Primitive(p) => primitive_type(*p).to_string(),
        TypeRef::ArrayOf(element) => format!("Vec<{}>", render_type(element, domain, scope)),
        TypeRef::LocalRef(name) => local_path(name, scope),
        TypeRef::ForeignRef(target, name) if target == domain => local_path(name, scope),
        TypeRef::ForeignRef(target, name) => {
            format!("super::super::{}::types::{}", module_ident(target), type_ident(name))
        }
    }
}

fn local_path(name: &str, scope: Scope) -> String {
    match scope {
        Scope::Types => type_ident(name),
        Scope::Sibling => format!("super::types::{}", type_ident(name)),
    }
}

type Node = (String, String);

/// Direct containment between named types, used to box recursive fields.
///
/// An edge runs from a type to every type it holds by value: object
/// properties and alias targets that are references, not arrays.
#[derive(Debug, Clone, Default)]
pub struct RecursionIndex {
    edges: BTreeMap<Node, BTreeSet<Node>>,
}

impl RecursionIndex {
    /// Index every named type of `model`.
    pub fn new(model: &ProtocolModel) -> Self {
        let mut edges: BTreeMap<Node, BTreeSet<Node>> = BTreeMap::new();
        for domain in &model.domains {
            for ty in &domain.types {
                let targets: BTreeSet<Node> = match &ty.shape {
                    TypeShape::Alias(alias) =>
                        direct_target(alias, &domain.name).into_iter().collect(),
                    TypeShape::Object(props) =>
                        props.iter().filter_map(|p| direct_target(&p.ty, &domain.name)).collect(),
                    TypeShape::Enum(_) => BTreeSet::new(),
                };
                edges.insert((domain.name.clone(), ty.name.clone()), targets);
            }
        }
        Self { edges }
    }

    /// Whether a property of `owner` (in `domain`) with type `ty` closes a
    /// by-value cycle back to `owner` and must be boxed.
    pub fn needs_box(&self, domain: &str, owner: &str, ty: &TypeRef) -> bool {
        match direct_target(ty, domain) {
            Some(start) => self.reaches(start, &(domain.to_string(), owner.to_string())),
            None => false,
        }
    }

    fn reaches(&self, start: Node, goal: &Node) -> bool {
        let mut visited = BTreeSet::new();
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if &node == goal {
                return true;
            }
            if !visited.insert(node.clone()) {
                continue;
            }
            if let Some(next) = self.edges.get(&node) {
                stack.extend(next.iter().filter(|n| !visited.contains(*n)).cloned());
            }
        }
        false
    }
}

fn direct_target(ty: &TypeRef, domain: &str) -> Option<Node> {
    ty.target(domain).map(|(d, n)| (d.to_string(), n.to_string()))
}
