#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `protogen-transport`: runtime contract for generated CDP bindings
//!
//! Generated domain modules never open a socket. They are written against the
//! small contract in this crate, and the host application supplies the actual
//! WebSocket connection and request/response correlation.
//!
//! ## Core Concepts
//!
//! ### `Transport` Trait
//! `send("Domain.command", params)` suspends until the correlated response
//! arrives (or the host times out), and `on("Domain.event", handler, once)`
//! registers an event handler for the connection.
//!
//! ### `TransportError`
//! Failure classes seen by generated clients: transport failure, timeout,
//! protocol error responses and payload serialization.
//!
//! ### `Lenient`
//! Best-effort decoding: a response either decodes into its typed struct or is
//! handed back as the raw JSON value. Decoding never fails.
//!
//! ### `Params`
//! Payload builder that omits absent optional parameters instead of sending `null`.
//!
//! ### `EventBus`
//! Per-connection event registry with synchronous fan-out in registration order.
//! Hosts typically own one bus per connection and implement [`Transport::on`] by
//! delegating to it.
//!
//! ## Example
//! ```no_run
//! use serde_json::Map;
//! use transport::{DynTransport, TransportError};
//!
//! async fn demo(transport: DynTransport) -> Result<(), TransportError> {
//!     let result = transport.send("Runtime.evaluate", Map::new()).await?;
//!     println!("result = {}", result["result"]);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

pub mod event_bus;
pub mod lenient;
pub mod params;

pub use event_bus::{EventBus, HandlerId};
pub use lenient::Lenient;
pub use params::Params;

/// Type alias for structured error handling in transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Canonical error type for all transport implementations.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    /// The underlying connection failed or was closed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// No response arrived for the named method before the host's deadline.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The browser answered with an error object.
    #[error("Protocol error {code}: {message}")]
    Protocol {
        /// Error code from the response.
        code: i64,
        /// Error message from the response.
        message: String,
    },

    /// Failure to serialize or deserialize a JSON payload.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self { TransportError::Serialization(err.to_string()) }
}

/// Event callback. Receives the event's `params` object.
pub type EventHandler = Arc<dyn Fn(&Value) + Send + Sync>;

/// The collaborator contract generated clients are written against.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a command and wait for its result.
    ///
    /// `method` is the wire name (`"Page.navigate"`) and `params` the already
    /// built payload. Implementations return the response's `result` object.
    async fn send(&self, method: &str, params: Map<String, Value>) -> Result<Value>;

    /// Register `handler` for `event` (`"Page.loadEventFired"`).
    ///
    /// A `once` handler is removed before its first invocation.
    fn on(&self, event: &str, handler: EventHandler, once: bool) -> HandlerId;

    /// Returns the configured endpoint or connection descriptor.
    fn endpoint(&self) -> &str;
}

/// Type alias for a shared, dynamically dispatched transport instance.
pub type DynTransport = Arc<dyn Transport>;

/// A generated event struct, tied to its wire name.
pub trait EventPayload: serde::de::DeserializeOwned {
    /// Wire name, `Domain.event`.
    const NAME: &'static str;

    /// Decode the event's `params` best-effort.
    fn parse(params: &Value) -> Lenient<Self> { Lenient::decode(params.clone()) }
}
