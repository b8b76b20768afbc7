//! Unit tests for the resolved model

use std::collections::BTreeSet;

use ir::*;
use schema::ProtocolVersion;

fn param(name: &str, ty: TypeRef, optional: bool) -> ResolvedParam {
    ResolvedParam {
        name: name.to_string(),
        ty,
        optional,
        enum_values: None,
        description: None,
        deprecated: false,
        experimental: false,
    }
}

fn domain(name: &str) -> DomainModel {
    DomainModel {
        name: name.to_string(),
        description: None,
        deprecated: false,
        experimental: false,
        declared_dependencies: vec![],
        dependencies: BTreeSet::new(),
        types: vec![],
        commands: vec![],
        events: vec![],
    }
}

fn sample_model() -> ProtocolModel {
    let mut foo = domain("Foo");
    foo.types.push(ResolvedType {
        name: "Bar".to_string(),
        description: Some("A bar.".to_string()),
        deprecated: false,
        experimental: false,
        shape: TypeShape::Object(vec![param("id", TypeRef::Primitive(Primitive::Integer), false)]),
    });
    foo.commands.push(ResolvedCommand {
        name: "get".to_string(),
        description: None,
        deprecated: false,
        experimental: false,
        parameters: vec![param("id", TypeRef::Primitive(Primitive::Integer), false)],
        returns: vec![param("value", TypeRef::Primitive(Primitive::String), false)],
    });
    foo.events.push(ResolvedEvent {
        name: "changed".to_string(),
        description: None,
        deprecated: false,
        experimental: false,
        parameters: vec![param("bar", TypeRef::local("Bar"), true)],
    });

    let mut baz = domain("Baz");
    baz.declared_dependencies.push("Foo".to_string());
    baz.dependencies.insert("Foo".to_string());

    ProtocolModel {
        version: ProtocolVersion::new(1, 3),
        domains: vec![baz, foo],
        order: vec!["Foo".to_string(), "Baz".to_string()],
    }
}

#[test]
fn test_ordered_domains_follow_emission_order() {
    let model = sample_model();
    let names: Vec<_> = model.ordered_domains().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Foo", "Baz"]);
    let declared: Vec<_> = model.domains.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(declared, vec!["Baz", "Foo"]);
}

#[test]
fn test_counts_and_lookups() {
    let model = sample_model();
    assert_eq!(model.type_count(), 1);
    assert_eq!(model.command_count(), 1);
    assert_eq!(model.event_count(), 1);

    let foo = model.domain("Foo").expect("Foo should exist");
    assert!(foo.has_events());
    assert_eq!(foo.type_def("Bar").expect("Bar").properties().len(), 1);

    let get = foo.command("get").expect("get command");
    assert_eq!(get.method("Foo"), "Foo.get");
    assert!(get.has_returns());
    assert_eq!(foo.event("changed").expect("event").method("Foo"), "Foo.changed");

    assert!(!model.domain("Baz").expect("Baz").has_events());
    assert!(model.domain("Qux").is_none());
}

#[test]
fn test_non_object_shapes_have_no_properties() {
    let alias = ResolvedType {
        name: "Id".to_string(),
        description: None,
        deprecated: false,
        experimental: false,
        shape: TypeShape::Alias(TypeRef::Primitive(Primitive::String)),
    };
    assert!(alias.properties().is_empty());
}

#[test]
fn test_model_file_round_trip() {
    let model = sample_model();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("model.json");

    model.to_file(&path).expect("write model");
    let text = std::fs::read_to_string(&path).expect("read back");
    assert!(text.ends_with('\n'));

    let loaded = ProtocolModel::from_file(&path).expect("parse model");
    assert_eq!(loaded, model);
}

#[test]
fn test_type_refs_serialize_externally_tagged() {
    let value = serde_json::to_value(TypeRef::foreign("Runtime", "RemoteObject")).expect("serialize");
    assert_eq!(value, serde_json::json!({"ForeignRef": ["Runtime", "RemoteObject"]}));
    let value = serde_json::to_value(TypeRef::array_of(TypeRef::Primitive(Primitive::Any)))
        .expect("serialize");
    assert_eq!(value, serde_json::json!({"ArrayOf": {"Primitive": "any"}}));
}
