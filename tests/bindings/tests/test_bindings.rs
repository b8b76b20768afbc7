//! Generated clients driven over an in-memory transport.
//!
//! The modules under test are produced by this crate's build script, so
//! everything here also checks that the emitted code compiles.

use std::sync::{Arc, Mutex};

use bindings::{cdp, example};
use serde_json::{json, Map, Value};
use transport::{
    DynTransport, EventBus, EventHandler, HandlerId, Lenient, Transport, TransportError,
};

#[derive(Default)]
struct MockTransport {
    sent: Mutex<Vec<(String, Value)>>,
    bus: EventBus,
}

impl MockTransport {
    fn sent(&self) -> Vec<(String, Value)> { self.sent.lock().expect("sent log").clone() }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        method: &str,
        params: Map<String, Value>,
    ) -> Result<Value, TransportError> {
        self.sent.lock().expect("sent log").push((method.to_string(), Value::Object(params)));
        match method {
            "Foo.get" => Ok(json!({"value": "x"})),
            "Page.navigate" => Ok(json!({"frameId": "F1", "loaderId": "L1"})),
            "Page.getFrameTree" => Ok(json!({"frameTree": {"frame": {"id": "F1"}}})),
            "Page.reload" | "Security.enable" => Ok(json!({})),
            _ => Err(TransportError::Protocol {
                code: -32601,
                message: format!("'{}' wasn't found", method),
            }),
        }
    }

    fn on(&self, event: &str, handler: EventHandler, once: bool) -> HandlerId {
        self.bus.subscribe(event, handler, once)
    }

    fn endpoint(&self) -> &str { "mock://devtools" }
}

fn mock() -> (Arc<MockTransport>, DynTransport) {
    let mock = Arc::new(MockTransport::default());
    let transport: DynTransport = mock.clone();
    (mock, transport)
}

#[tokio::test]
async fn test_foo_get_sends_id_and_decodes_value() {
    let (mock, transport) = mock();
    let client = example::foo::Client::new(transport);

    let id: example::foo::types::Id = "42".to_string();
    let returns = client.get(id).await.expect("Foo.get");

    assert_eq!(mock.sent(), vec![("Foo.get".to_string(), json!({"id": "42"}))]);
    assert_eq!(returns.decoded().map(|r| r.value.as_str()), Some("x"));
    assert_eq!(example::PROTOCOL_VERSION, "1.0");
    assert_eq!(example::DOMAINS, &["Foo"]);
}

#[tokio::test]
async fn test_navigate_sends_only_supplied_keys() {
    let (mock, transport) = mock();
    let page = cdp::page::Client::new(transport);

    let returns = page.navigate("about:blank".to_string(), None, None).await.expect("navigate");

    assert_eq!(mock.sent(), vec![("Page.navigate".to_string(), json!({"url": "about:blank"}))]);
    let returns = returns.into_decoded().expect("decoded returns");
    assert_eq!(returns.frame_id, "F1");
    assert_eq!(returns.loader_id.as_deref(), Some("L1"));
    assert_eq!(returns.error_text, None);
}

#[tokio::test]
async fn test_optional_arguments_use_wire_names() {
    let (mock, transport) = mock();
    let page = cdp::page::Client::new(transport);

    page.reload(Some(true), None).await.expect("reload");
    page.navigate("https://example.com".to_string(), None, Some("F2".to_string()))
        .await
        .expect("navigate");

    let sent = mock.sent();
    assert_eq!(sent[0], ("Page.reload".to_string(), json!({"ignoreCache": true})));
    assert_eq!(
        sent[1],
        ("Page.navigate".to_string(), json!({"url": "https://example.com", "frameId": "F2"}))
    );
}

#[tokio::test]
async fn test_mismatched_returns_stay_raw() {
    let (_mock, transport) = mock();
    let page = cdp::page::Client::new(transport);

    let tree = page.get_frame_tree().await.expect("getFrameTree");
    assert!(tree.is_raw());
    assert_eq!(tree.field("frameTree"), Some(json!({"frame": {"id": "F1"}})));
}

#[tokio::test]
async fn test_protocol_errors_reach_the_caller() {
    let (_mock, transport) = mock();
    let security = cdp::security::Client::new(transport);

    security.enable().await.expect("enable");
    match security.set_ignore_certificate_errors(true).await {
        Err(TransportError::Protocol { code, message }) => {
            assert_eq!(code, -32601);
            assert!(message.contains("Security.setIgnoreCertificateErrors"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_subscription_decodes_event_payload() {
    let (mock, transport) = mock();
    let page = cdp::page::Client::new(transport);
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = seen.clone();
    page.on_load_event_fired(
        move |event| {
            if let Lenient::Decoded(event) = event {
                sink.lock().expect("seen").push(event.timestamp);
            }
        },
        true,
    );

    mock.bus.emit("Page.loadEventFired", &json!({"timestamp": 12.5}));
    mock.bus.emit("Page.loadEventFired", &json!({"timestamp": 13.0}));
    assert_eq!(*seen.lock().expect("seen"), vec![12.5]);
}

#[test]
fn test_constructor_takes_required_then_optional_fields() {
    let frame = cdp::page::types::Frame::new(
        "F1".to_string(),
        "L1".to_string(),
        "about:blank".to_string(),
        Some("F0".to_string()),
    );

    assert_eq!(frame.parent_id.as_deref(), Some("F0"));
    assert_eq!(
        serde_json::to_value(&frame).expect("serialize"),
        json!({"id": "F1", "parentId": "F0", "loaderId": "L1", "url": "about:blank"})
    );

    let orphan = cdp::page::types::Frame::new("F2".into(), "L2".into(), "x".into(), None);
    let value = serde_json::to_value(&orphan).expect("serialize");
    assert!(value.get("parentId").is_none());
}

#[test]
fn test_type_and_event_lookup_by_name() {
    use cdp::security::types::SecurityState;

    match cdp::security::decode_type("SecurityState", json!("insecure-broken")) {
        Some(Lenient::Decoded(cdp::security::TypeValue::SecurityState(state))) => {
            assert_eq!(state, SecurityState::InsecureBroken);
            assert_eq!(state.as_str(), "insecure-broken");
        }
        other => panic!("unexpected decode: {other:?}"),
    }
    assert!(cdp::security::decode_type("Nope", json!(null)).is_none());
    assert_eq!("secure".parse::<SecurityState>(), Ok(SecurityState::Secure));

    let event = cdp::page::decode_event("Page.loadEventFired", &json!({"timestamp": 1.5}))
        .and_then(Lenient::into_decoded)
        .expect("decoded event");
    assert_eq!(event.name(), "Page.loadEventFired");
    assert!(cdp::page::decode_event("Network.requestWillBeSent", &json!({})).is_none());
    assert!(cdp::page::EVENT_NAMES.contains(&"Page.frameNavigated"));
}

#[test]
fn test_root_module_lists_domains_in_emission_order() {
    assert_eq!(cdp::PROTOCOL_VERSION, "1.3");
    assert_eq!(cdp::DOMAINS, &["Security", "Runtime", "Network", "Debugger", "Page", "DOM"]);
    assert_eq!(cdp::page::DOMAIN, "Page");
}
