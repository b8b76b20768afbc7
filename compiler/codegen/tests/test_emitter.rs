//! Emitter tests over the CDP fixtures and small hand-written schemas.

use ir::ProtocolModel;
use protogen_codegen::{DirectorySink, Emitter, MemorySink, OutputSink};
use schema::{load, load_sources};
use serde_json::{json, Value};

const BROWSER: &str = include_str!("../../../resources/fixtures/browser_protocol.json");
const JS: &str = include_str!("../../../resources/fixtures/js_protocol.json");

fn fixture_model() -> ProtocolModel {
    let doc = load_sources(&[BROWSER, JS]).expect("fixtures should load");
    analysis::build(&doc).expect("fixtures should build")
}

fn model_of(domains: Value) -> ProtocolModel {
    let doc = load(&[json!({"version": {"major": "1", "minor": "0"}, "domains": domains})])
        .expect("document should load");
    analysis::build(&doc).expect("document should build")
}

fn emit(model: &ProtocolModel) -> MemorySink {
    let mut sink = MemorySink::new();
    Emitter::new().emit(model, &mut sink).expect("emit");
    sink
}

fn file<'a>(sink: &'a MemorySink, path: &str) -> &'a str {
    sink.get(path).unwrap_or_else(|| panic!("missing {path}"))
}

#[test]
fn test_every_domain_gets_four_units_plus_root() {
    let model = fixture_model();
    let files = Emitter::new().render(&model).expect("render");
    let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();

    let mut expected = Vec::new();
    for module in ["security", "runtime", "network", "debugger", "page", "dom"] {
        for unit in ["types.rs", "events.rs", "client.rs", "mod.rs"] {
            expected.push(format!("{module}/{unit}"));
        }
    }
    expected.push("mod.rs".to_string());
    assert_eq!(paths, expected);
}

#[test]
fn test_emission_is_deterministic() {
    let first = emit(&fixture_model());
    let second = emit(&fixture_model());
    assert_eq!(first, second);
}

#[test]
fn test_root_module_lists_domains_in_emission_order() {
    let sink = emit(&fixture_model());
    let root = file(&sink, "mod.rs");

    assert!(root.starts_with("//! Chrome DevTools Protocol bindings, protocol version 1.3.\n"));
    let mods: Vec<_> = root.lines().filter(|l| l.starts_with("pub mod ")).collect();
    assert_eq!(
        mods,
        vec![
            "pub mod security;",
            "pub mod runtime;",
            "pub mod network;",
            "pub mod debugger;",
            "pub mod page;",
            "pub mod dom;",
        ]
    );
    assert!(root.contains("pub const PROTOCOL_VERSION: &str = \"1.3\";"));
}

#[test]
fn test_types_unit_shapes() {
    let sink = emit(&fixture_model());
    let network = file(&sink, "network/types.rs");

    assert!(network.contains("/// Unique loader identifier.\npub type LoaderId = String;\n"));
    assert!(network.contains("pub type MonotonicTime = f64;"));
    assert!(network.contains("pub type Headers = serde_json::Map<String, serde_json::Value>;"));
    assert!(network.contains("pub enum ResourceType {\n    #[serde(rename = \"Document\")]\n    Document,\n"));
    assert!(network.contains("    #[serde(rename = \"XHR\")]\n    XHR,\n"));
    assert!(network.contains(
        "    /// HTTP POST request data.\n    #[serde(rename = \"postData\", default, skip_serializing_if = \"Option::is_none\")]\n    pub post_data: Option<String>,\n"
    ));
    assert!(network.contains("    pub referrer_policy: RequestReferrerPolicy,\n"));
    assert!(network.contains("pub enum RequestReferrerPolicy {"));
    assert!(network.contains("    #[serde(rename = \"no-referrer-when-downgrade\")]\n    NoReferrerWhenDowngrade,\n"));
    assert!(network.contains(
        "    pub fn new(url: String, method: String, headers: Headers, \
         referrer_policy: RequestReferrerPolicy, post_data: Option<String>) -> Self {\n        \
         Self { url, method, headers, post_data, referrer_policy }\n    }\n"
    ));
    assert!(network.contains("    pub r#type: InitiatorType,\n"));
    assert!(network.contains("    pub stack: Option<super::super::runtime::types::StackTrace>,\n"));
    assert!(network.contains(
        "    pub fn parse(value: serde_json::Value) -> transport::Lenient<Self> {\n        transport::Lenient::decode(value)\n    }\n"
    ));
}

#[test]
fn test_recursive_fields_are_boxed_but_arrays_are_not() {
    let sink = emit(&fixture_model());
    let dom = file(&sink, "dom/types.rs");
    assert!(dom.contains("    pub content_document: Option<Box<Node>>,\n"));
    assert!(dom.contains("    pub children: Option<Vec<Node>>,\n"));
    assert!(dom.contains("    pub frame_id: Option<super::super::page::types::FrameId>,\n"));

    let runtime = file(&sink, "runtime/types.rs");
    assert!(runtime.contains("    pub parent: Option<Box<StackTrace>>,\n"));
    assert!(runtime.contains("    pub call_frames: Vec<CallFrame>,\n"));

    let page = file(&sink, "page/types.rs");
    assert!(page.contains("    pub child_frames: Option<Vec<FrameTree>>,\n"));
}

#[test]
fn test_type_value_mapping() {
    let sink = emit(&fixture_model());
    let security = file(&sink, "security/types.rs");

    assert!(security.contains("pub enum TypeValue {\n    SecurityState(SecurityState),\n}"));
    assert!(security.contains("pub const TYPE_NAMES: &[&str] = &[\"SecurityState\"];"));
    assert!(security.contains(
        "        \"SecurityState\" => Some(transport::Lenient::<SecurityState>::decode(value).map(TypeValue::SecurityState)),\n"
    ));
    assert!(security.contains("    #[serde(rename = \"insecure-broken\")]\n    InsecureBroken,\n"));
}

#[test]
fn test_events_unit() {
    let sink = emit(&fixture_model());
    let page = file(&sink, "page/events.rs");

    assert!(page.contains("pub struct LoadEventFiredEvent {\n    pub timestamp: super::super::network::types::MonotonicTime,\n}"));
    assert!(page.contains(
        "impl transport::EventPayload for LoadEventFiredEvent {\n    const NAME: &'static str = \"Page.loadEventFired\";\n}"
    ));
    assert!(page.contains("    FrameNavigated(FrameNavigatedEvent),\n"));
    assert!(page.contains(
        "pub const EVENT_NAMES: &[&str] = &[\"Page.loadEventFired\", \"Page.frameNavigated\"];"
    ));

    let dom = file(&sink, "dom/events.rs");
    assert!(dom.contains("pub struct DocumentUpdatedEvent {}"));

    let debugger = file(&sink, "debugger/events.rs");
    assert!(debugger.contains("    pub reason: PausedReason,\n"));
    assert!(debugger.contains("    #[serde(rename = \"debugCommand\")]\n    DebugCommand,\n"));
    assert!(debugger.contains("    pub call_frames: Vec<super::super::runtime::types::CallFrame>,\n"));
}

#[test]
fn test_domain_without_events_has_same_shape() {
    let sink = emit(&fixture_model());
    let security = file(&sink, "security/events.rs");

    assert!(security.contains("pub enum DomainEvent {\n}"));
    assert!(security.contains("        match *self {}"));
    assert!(security.contains("pub const EVENT_NAMES: &[&str] = &[];"));
    assert!(security.contains("    let _ = (name, params);\n    None\n"));
}

#[test]
fn test_client_unit_commands() {
    let sink = emit(&fixture_model());
    let page = file(&sink, "page/client.rs");

    assert!(page.contains(
        "    pub async fn navigate(\n        &self,\n        url: String,\n        referrer: Option<String>,\n        frame_id: Option<super::types::FrameId>,\n    ) -> transport::Result<transport::Lenient<NavigateReturns>> {\n        let params = transport::Params::new()\n            .required(\"url\", url)?\n            .optional(\"referrer\", referrer)?\n            .optional(\"frameId\", frame_id)?\n            .into_map();\n        let result = self.transport.send(\"Page.navigate\", params).await?;\n        Ok(transport::Lenient::decode(result))\n    }\n"
    ));
    assert!(page.contains("        self.transport.send(\"Page.reload\", params).await?;\n        Ok(())\n"));
    assert!(page.contains(
        "    pub async fn get_frame_tree(&self) -> transport::Result<transport::Lenient<GetFrameTreeReturns>> {\n        let params = transport::Params::new().into_map();\n"
    ));
    assert!(page.contains("    pub loader_id: Option<super::super::network::types::LoaderId>,\n"));
    assert!(page.contains("    pub node_id: super::super::dom::types::NodeId,\n"));
    assert!(page.contains("    /// **Experimental.**\n    ///\n    /// Sends `Page.getFrameOwner`.\n"));
}

#[test]
fn test_client_unit_subscriptions() {
    let sink = emit(&fixture_model());
    let page = file(&sink, "page/client.rs");

    assert!(page.contains(
        "    pub fn on_load_event_fired<F>(&self, handler: F, once: bool) -> transport::HandlerId\n    where\n        F: Fn(transport::Lenient<super::events::LoadEventFiredEvent>) + Send + Sync + 'static,\n"
    ));
    assert!(page.contains("        self.transport.on(\"Page.loadEventFired\", callback, once)\n"));

    let security = file(&sink, "security/client.rs");
    assert!(!security.contains("pub fn on_"));
}

#[test]
fn test_end_to_end_get_command() {
    let model = model_of(json!([{
        "domain": "Foo",
        "types": [{"id": "Id", "type": "string"}],
        "commands": [{
            "name": "get",
            "parameters": [{"name": "id", "$ref": "Id"}],
            "returns": [{"name": "value", "type": "string"}]
        }]
    }]));
    let sink = emit(&model);
    let client = file(&sink, "foo/client.rs");

    assert!(client.contains(
        "    pub async fn get(\n        &self,\n        id: super::types::Id,\n    ) \
         -> transport::Result<transport::Lenient<GetReturns>> {\n"
    ));
    assert!(client.contains("            .required(\"id\", id)?\n"));
    assert!(client.contains("        let result = self.transport.send(\"Foo.get\", params).await?;\n"));
    assert!(client.contains("pub struct GetReturns {\n    pub value: String,\n}"));
    assert!(file(&sink, "foo/types.rs").contains("pub type Id = String;"));
}

#[test]
fn test_declared_type_value_renames_generated_enum() {
    let model = model_of(json!([{
        "domain": "Foo",
        "types": [
            {"id": "TypeValue", "type": "string"},
            {"id": "Other", "type": "integer"}
        ]
    }]));
    let sink = emit(&model);

    let types = file(&sink, "foo/types.rs");
    assert!(types.contains("pub type TypeValue = String;"));
    assert!(types.contains("pub enum TypeValue2 {\n    TypeValue(TypeValue),\n    Other(Other),\n}"));
    assert!(types.contains("-> Option<transport::Lenient<TypeValue2>> {"));
    assert!(types.contains(".map(TypeValue2::Other)),"));
    assert!(file(&sink, "foo/mod.rs").contains("pub use types::{decode_type, TypeValue2, TYPE_NAMES};"));
}

#[test]
fn test_cycle_renders_cross_references() {
    let model = model_of(json!([
        {"domain": "D1", "types": [
            {"id": "A", "type": "object", "properties": [{"name": "b", "optional": true, "$ref": "D2.B"}]}
        ]},
        {"domain": "D2", "types": [
            {"id": "B", "type": "object", "properties": [{"name": "a", "optional": true, "$ref": "D1.A"}]}
        ]}
    ]));
    let sink = emit(&model);

    assert!(file(&sink, "d1/types.rs").contains("    pub b: Option<Box<super::super::d2::types::B>>,\n"));
    assert!(file(&sink, "d2/types.rs").contains("    pub a: Option<Box<super::super::d1::types::A>>,\n"));
}

#[test]
fn test_name_collisions_are_resolved() {
    let model = model_of(json!([{
        "domain": "Foo",
        "types": [
            {"id": "HolderKind", "type": "string"},
            {"id": "Holder", "type": "object", "properties": [
                {"name": "kind", "type": "string", "enum": ["a", "b"]}
            ]}
        ],
        "commands": [{"name": "get", "parameters": [{"name": "self", "type": "string"}]}]
    }]));
    let sink = emit(&model);

    let types = file(&sink, "foo/types.rs");
    assert!(types.contains("pub type HolderKind = String;"));
    assert!(types.contains("    pub kind: HolderKind2,\n"));
    assert!(types.contains("pub enum HolderKind2 {"));

    let client = file(&sink, "foo/client.rs");
    assert!(client.contains("        self_: String,\n"));
    assert!(client.contains("            .required(\"self\", self_)?\n"));
}

#[test]
fn test_unknown_domain_in_order_writes_nothing() {
    let mut model = fixture_model();
    model.order.push("Ghost".to_string());

    let mut sink = MemorySink::new();
    let err = Emitter::new().emit(&model, &mut sink).expect_err("unknown domain must fail");
    assert!(err.to_string().contains("Ghost"));
    assert!(sink.is_empty());
}

#[test]
fn test_directory_sink_matches_memory_sink() {
    let model = fixture_model();
    let dir = tempfile::tempdir().expect("tempdir");
    let mut disk = DirectorySink::new(dir.path());
    Emitter::new().emit(&model, &mut disk).expect("emit to disk");

    let memory = emit(&model);
    assert_eq!(disk.written().len(), memory.len());
    for (path, contents) in memory.files() {
        let on_disk = std::fs::read_to_string(dir.path().join(path)).expect("read back");
        assert_eq!(&on_disk, contents, "{path}");
    }
}

#[test]
fn test_sink_trait_object() {
    let mut sink = MemorySink::new();
    let dyn_sink: &mut dyn OutputSink = &mut sink;
    dyn_sink.write_file("x.rs", "fn x() {}\n").expect("write");
    assert_eq!(sink.len(), 1);
}
