// SPDX-License-Identifier: MIT OR Apache-2.0

//! Protogen umbrella crate.
//!
//! This crate primarily serves as the workspace root.
//!
//! The compiler itself lives in the workspace member crates: the schema loader and
//! resolved model under `primitives/`, the resolver, emitter and pipeline under
//! `compiler/`, and the `protogen` binary under `cli/`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![doc(test(attr(warn(unused))))]

/// Miscellaneous metadata about the Protogen workspace.
pub mod protogen_meta {
    /// Version string for the umbrella crate, as reported by Cargo.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
