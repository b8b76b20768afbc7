//! Command payload builder.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::Result;

/// Builds a command's `params` object in declaration order.
///
/// Optional parameters that are `None` are left out of the payload entirely.
#[derive(Debug, Clone, Default)]
pub struct Params {
    map: Map<String, Value>,
}

impl Params {
    /// Empty payload.
    pub fn new() -> Self { Self::default() }

    /// Add a required parameter.
    pub fn required<T: Serialize>(mut self, name: &str, value: T) -> Result<Self> {
        self.map.insert(name.to_string(), serde_json::to_value(value)?);
        Ok(self)
    }

    /// Add an optional parameter, skipping it when absent.
    pub fn optional<T: Serialize>(self, name: &str, value: Option<T>) -> Result<Self> {
        match value {
            Some(value) => self.required(name, value),
            None => Ok(self),
        }
    }

    /// Number of parameters set so far.
    pub fn len(&self) -> usize { self.map.len() }

    /// Whether no parameter has been set.
    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    /// Finish building.
    pub fn into_map(self) -> Map<String, Value> { self.map }
}
