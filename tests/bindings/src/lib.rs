#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Bindings generated at build time, compiled as part of this crate.
//!
//! - `cdp` - The bundled browser and JS protocol fixtures
//! - `example` - A single `Foo` domain with one `get` command

include!(concat!(env!("OUT_DIR"), "/bindings.rs"));
