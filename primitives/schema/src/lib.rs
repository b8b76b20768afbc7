// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Chrome DevTools Protocol schema documents.
//!
//! The browser exposes its protocol as two JSON documents (`browser_protocol.json`
//! and `js_protocol.json`). This crate deserializes them into one immutable
//! [`ProtocolDocument`] whose domains keep declaration order: the browser
//! protocol's domains first, then the JS protocol's.
//!
//! Nothing here interprets `$ref` strings; descriptors are kept exactly as written
//! and resolved later by the analysis crate.

use std::path::PathBuf;

use thiserror::Error;

pub mod document;
pub mod loader;
pub mod version;

pub use document::{
    CommandSpec, DomainSpec, EventSpec, ParamSpec, ProtocolDocument, TypeDescriptor, TypeSpec,
};
pub use loader::{load, load_files, load_sources};
pub use version::{ProtocolVersion, VersionError};

/// Errors raised while loading schema documents.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A document or one of its entries is malformed or inconsistent.
    #[error("Schema parse error: {0}")]
    Parse(String),

    /// Two domains share a name.
    #[error("Duplicate domain '{0}'")]
    DuplicateDomain(String),

    /// A schema file could not be read.
    #[error("Failed to read schema file {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;
