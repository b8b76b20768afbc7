//! Best-effort decoding of protocol payloads.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::trace;

/// A payload that decoded into `T`, or the raw value it came from.
///
/// Decoding never fails. Extra keys are ignored; anything that does not fit `T`
/// is returned untouched as `Raw`.
#[derive(Debug, Clone, PartialEq)]
pub enum Lenient<T> {
    /// The payload matched `T`.
    Decoded(T),
    /// The payload did not match; here it is as received.
    Raw(Value),
}

impl<T: DeserializeOwned> Lenient<T> {
    /// Decode `value` into `T`, falling back to the raw value.
    pub fn decode(value: Value) -> Self {
        match <T as serde::Deserialize>::deserialize(&value) {
            Ok(decoded) => Lenient::Decoded(decoded),
            Err(e) => {
                trace!(target: "protogen::lenient", error = %e, "keeping raw payload");
                Lenient::Raw(value)
            }
        }
    }
}

impl<T> Lenient<T> {
    /// Whether the payload decoded.
    pub fn is_decoded(&self) -> bool { matches!(self, Lenient::Decoded(_)) }

    /// Whether the payload was kept raw.
    pub fn is_raw(&self) -> bool { matches!(self, Lenient::Raw(_)) }

    /// The decoded value, if any.
    pub fn decoded(&self) -> Option<&T> {
        match self {
            Lenient::Decoded(t) => Some(t),
            Lenient::Raw(_) => None,
        }
    }

    /// Consume into the decoded value, if any.
    pub fn into_decoded(self) -> Option<T> {
        match self {
            Lenient::Decoded(t) => Some(t),
            Lenient::Raw(_) => None,
        }
    }

    /// The raw value, if decoding failed.
    pub fn raw(&self) -> Option<&Value> {
        match self {
            Lenient::Decoded(_) => None,
            Lenient::Raw(v) => Some(v),
        }
    }

    /// `Ok` with the decoded value or `Err` with the raw one.
    pub fn into_result(self) -> Result<T, Value> {
        match self {
            Lenient::Decoded(t) => Ok(t),
            Lenient::Raw(v) => Err(v),
        }
    }

    /// Map the decoded value, leaving a raw value untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lenient<U> {
        match self {
            Lenient::Decoded(t) => Lenient::Decoded(f(t)),
            Lenient::Raw(v) => Lenient::Raw(v),
        }
    }
}

impl<T: Serialize> Lenient<T> {
    /// Read a field by its wire name, whichever form the payload is in.
    pub fn field(&self, name: &str) -> Option<Value> {
        match self {
            Lenient::Decoded(t) => match serde_json::to_value(t) {
                Ok(Value::Object(mut map)) => map.remove(name),
                _ => None,
            },
            Lenient::Raw(v) => v.get(name).cloned(),
        }
    }

    /// Convert back to JSON.
    pub fn into_value(self) -> Value {
        match self {
            Lenient::Decoded(t) => serde_json::to_value(t).unwrap_or(Value::Null),
            Lenient::Raw(v) => v,
        }
    }
}
