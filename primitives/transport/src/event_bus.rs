//! Per-connection event dispatch.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tracing::trace;

use crate::EventHandler;

/// Identifies one registration on an [`EventBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(u64);

struct Registration {
    id: HandlerId,
    handler: EventHandler,
    once: bool,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: BTreeMap<String, Vec<Registration>>,
}

/// Event registry owned by a single connection.
///
/// Dispatch is synchronous and follows registration order. The registry lock is
/// released before handlers run, so a handler may subscribe, unsubscribe or emit
/// on the same bus.
#[derive(Default)]
pub struct EventBus {
    registry: Mutex<Registry>,
}

impl EventBus {
    /// Empty bus.
    pub fn new() -> Self { Self::default() }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `handler` for `event`. A `once` handler fires at most one time.
    pub fn subscribe(&self, event: &str, handler: EventHandler, once: bool) -> HandlerId {
        let mut registry = self.lock();
        let id = HandlerId(registry.next_id);
        registry.next_id += 1;
        registry
            .handlers
            .entry(event.to_string())
            .or_default()
            .push(Registration { id, handler, once });
        id
    }

    /// Remove a registration. Returns whether it was present.
    pub fn unsubscribe(&self, id: HandlerId) -> bool {
        let mut registry = self.lock();
        let mut removed = false;
        for list in registry.handlers.values_mut() {
            let before = list.len();
            list.retain(|r| r.id != id);
            removed |= list.len() != before;
        }
        registry.handlers.retain(|_, list| !list.is_empty());
        removed
    }

    /// Deliver `params` to every handler registered for `event`.
    ///
    /// `once` handlers are dropped from the registry before any handler runs.
    /// Returns the number of handlers invoked.
    pub fn emit(&self, event: &str, params: &Value) -> usize {
        let snapshot: Vec<EventHandler> = {
            let mut registry = self.lock();
            let Some(list) = registry.handlers.get_mut(event) else {
                return 0;
            };
            let snapshot = list.iter().map(|r| r.handler.clone()).collect();
            list.retain(|r| !r.once);
            if list.is_empty() {
                registry.handlers.remove(event);
            }
            snapshot
        };

        trace!(target: "protogen::event_bus", event, handlers = snapshot.len(), "dispatching");
        for handler in &snapshot {
            handler(params);
        }
        snapshot.len()
    }

    /// Number of live registrations for `event`.
    pub fn handler_count(&self, event: &str) -> usize {
        self.lock().handlers.get(event).map(Vec::len).unwrap_or(0)
    }

    /// Drop every registration.
    pub fn clear(&self) { self.lock().handlers.clear(); }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.lock();
        let counts: BTreeMap<&str, usize> =
            registry.handlers.iter().map(|(event, list)| (event.as_str(), list.len())).collect();
        f.debug_struct("EventBus").field("handlers", &counts).finish()
    }
}
