//! Type Resolution
//!
//! Maps raw schema descriptors to [`TypeRef`]s and looks references up against
//! the document they came from.

use ir::{InvalidQuery, Primitive, TypeRef};
use schema::{ProtocolDocument, TypeDescriptor, TypeSpec};

use crate::{AnalysisError, Result};

/// Resolves descriptors and references against one document.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    document: &'a ProtocolDocument,
}

impl<'a> TypeResolver<'a> {
    /// Create a resolver over `document`.
    pub fn new(document: &'a ProtocolDocument) -> Self { Self { document } }

    /// Turn a raw descriptor into a [`TypeRef`].
    ///
    /// This is purely structural: references are split but not checked. Use
    /// [`TypeResolver::resolve_checked`] to also verify that every reference exists.
    pub fn resolve(&self, raw: &TypeDescriptor, owning_domain: &str) -> Result<TypeRef> {
        self.resolve_at(raw, owning_domain)
    }

    /// Resolve `raw`, naming `location` in any error.
    pub fn resolve_at(&self, raw: &TypeDescriptor, location: &str) -> Result<TypeRef> {
        if let Some(reference) = &raw.reference {
            return Ok(match reference.split_once('.') {
                Some((domain, name)) => TypeRef::foreign(domain, name),
                None => TypeRef::local(reference.as_str()),
            });
        }

        match raw.kind.as_deref() {
            Some("array") => {
                let items = raw.items.as_deref().ok_or_else(|| AnalysisError::MissingItems {
                    location: location.to_string(),
                })?;
                Ok(TypeRef::array_of(self.resolve_at(items, &format!("{}[]", location))?))
            }
            Some(keyword) => Primitive::from_keyword(keyword).map(TypeRef::Primitive).ok_or_else(
                || AnalysisError::UnknownPrimitive {
                    location: location.to_string(),
                    keyword: keyword.to_string(),
                },
            ),
            None => Err(AnalysisError::EmptyDescriptor { location: location.to_string() }),
        }
    }

    /// Resolve `raw` inside `owning_domain` and check that every reference in it
    /// (including array elements) names an existing type.
    pub fn resolve_checked(
        &self,
        raw: &TypeDescriptor,
        owning_domain: &str,
        location: &str,
    ) -> Result<TypeRef> {
        let resolved = self.resolve_at(raw, location)?;
        let innermost = resolved.innermost();
        if innermost.referenced_name().is_some() {
            self.lookup_at(innermost, owning_domain, location)?;
        }
        Ok(resolved)
    }

    /// Find the [`TypeSpec`] a reference points at.
    pub fn lookup(&self, reference: &TypeRef, owning_domain: &str) -> Result<&'a TypeSpec> {
        self.lookup_at(reference, owning_domain, owning_domain)
    }

    fn lookup_at(
        &self,
        reference: &TypeRef,
        owning_domain: &str,
        location: &str,
    ) -> Result<&'a TypeSpec> {
        let (domain_name, type_name) = reference.target(owning_domain).ok_or_else(|| {
            AnalysisError::InvalidQuery(InvalidQuery {
                query: "lookup",
                found: reference.to_string(),
            })
        })?;

        let domain =
            self.document.domain(domain_name).ok_or_else(|| AnalysisError::UnknownDomain {
                location: location.to_string(),
                reference: reference.to_string(),
                domain: domain_name.to_string(),
            })?;

        domain.type_spec(type_name).ok_or_else(|| AnalysisError::MissingType {
            location: location.to_string(),
            domain: domain_name.to_string(),
            type_name: type_name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use schema::load;
    use serde_json::json;

    use super::*;

    fn document() -> ProtocolDocument {
        load(&[json!({
            "version": {"major": "1", "minor": "0"},
            "domains": [
                {"domain": "A", "types": [{"id": "B", "type": "string"}]},
                {"domain": "Foo", "types": [{"id": "Bar", "type": "integer"}]}
            ]
        })])
        .expect("document")
    }

    #[test]
    fn qualified_ref_is_foreign() {
        let doc = document();
        let resolver = TypeResolver::new(&doc);
        let r = resolver.resolve(&TypeDescriptor::of_ref("A.B"), "Foo").expect("resolve");
        assert!(r.is_foreign_ref());
        assert_eq!(r.foreign_domain_name().expect("foreign"), "A");
    }

    #[test]
    fn bare_ref_is_local() {
        let doc = document();
        let resolver = TypeResolver::new(&doc);
        let r = resolver.resolve(&TypeDescriptor::of_ref("B"), "A").expect("resolve");
        assert_eq!(r, TypeRef::local("B"));
        assert!(r.foreign_domain_name().is_err());
    }

    #[test]
    fn splits_on_first_dot_only() {
        let doc = document();
        let resolver = TypeResolver::new(&doc);
        let r = resolver.resolve(&TypeDescriptor::of_ref("A.B.C"), "Foo").expect("resolve");
        assert_eq!(r, TypeRef::foreign("A", "B.C"));
    }

    #[test]
    fn nested_arrays_resolve_recursively() {
        let doc = document();
        let resolver = TypeResolver::new(&doc);
        let raw = TypeDescriptor::array(TypeDescriptor::array(TypeDescriptor::primitive("number")));
        let r = resolver.resolve(&raw, "Foo").expect("resolve");
        assert_eq!(
            r,
            TypeRef::array_of(TypeRef::array_of(TypeRef::Primitive(Primitive::Number)))
        );
    }

    #[test]
    fn array_without_items_fails() {
        let doc = document();
        let resolver = TypeResolver::new(&doc);
        let raw = TypeDescriptor { kind: Some("array".into()), ..TypeDescriptor::default() };
        assert!(matches!(
            resolver.resolve(&raw, "Foo"),
            Err(AnalysisError::MissingItems { .. })
        ));
    }

    #[test]
    fn unknown_keyword_fails() {
        let doc = document();
        let resolver = TypeResolver::new(&doc);
        match resolver.resolve(&TypeDescriptor::primitive("float"), "Foo") {
            Err(AnalysisError::UnknownPrimitive { keyword, .. }) => assert_eq!(keyword, "float"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn empty_descriptor_fails() {
        let doc = document();
        let resolver = TypeResolver::new(&doc);
        assert!(matches!(
            resolver.resolve(&TypeDescriptor::default(), "Foo"),
            Err(AnalysisError::EmptyDescriptor { .. })
        ));
    }

    #[test]
    fn lookup_finds_local_and_foreign_types() {
        let doc = document();
        let resolver = TypeResolver::new(&doc);
        assert_eq!(resolver.lookup(&TypeRef::local("Bar"), "Foo").expect("local").id, "Bar");
        assert_eq!(resolver.lookup(&TypeRef::foreign("A", "B"), "Foo").expect("foreign").id, "B");
        let found = resolver.lookup(&TypeRef::foreign("Foo", "Bar"), "Foo").expect("self");
        assert_eq!(found.id, "Bar");
    }

    #[test]
    fn lookup_reports_missing_pieces() {
        let doc = document();
        let resolver = TypeResolver::new(&doc);
        assert!(matches!(
            resolver.lookup(&TypeRef::foreign("Nope", "B"), "Foo"),
            Err(AnalysisError::UnknownDomain { .. })
        ));
        match resolver.lookup(&TypeRef::foreign("A", "Qux"), "Foo") {
            Err(AnalysisError::MissingType { domain, type_name, .. }) => {
                assert_eq!(domain, "A");
                assert_eq!(type_name, "Qux");
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            resolver.lookup(&TypeRef::Primitive(Primitive::Any), "Foo"),
            Err(AnalysisError::InvalidQuery(_))
        ));
    }

    #[test]
    fn checked_resolution_looks_inside_arrays() {
        let doc = document();
        let resolver = TypeResolver::new(&doc);
        let raw = TypeDescriptor::array(TypeDescriptor::of_ref("A.Missing"));
        assert!(matches!(
            resolver.resolve_checked(&raw, "Foo", "Foo.items"),
            Err(AnalysisError::MissingType { .. })
        ));
    }
}
