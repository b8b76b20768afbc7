#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Protogen Compiler Analysis
//!
//! This crate turns a loaded [`schema::ProtocolDocument`] into a resolved
//! [`ir::ProtocolModel`]:
//! - [`resolver`] maps raw descriptors to structural [`ir::TypeRef`]s and looks
//!   references up against the document,
//! - [`builder`] resolves every domain and computes its dependency set,
//! - [`ordering`] decides the deterministic emission order,
//! - [`differential`] compares two schema documents.

use thiserror::Error;

pub mod builder;
pub mod differential;
pub mod ordering;
pub mod resolver;

pub use builder::{build, ModelBuilder};
pub use differential::SchemaDiff;
pub use ordering::emission_order;
pub use resolver::TypeResolver;

/// Errors produced while resolving a schema document.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A `type` keyword that is neither a primitive nor `array`.
    #[error("{location}: unknown primitive type '{keyword}'")]
    UnknownPrimitive {
        /// Where the descriptor appeared.
        location: String,
        /// The offending keyword.
        keyword: String,
    },

    /// A descriptor with neither `$ref` nor `type`.
    #[error("{location}: descriptor has neither `$ref` nor `type`")]
    EmptyDescriptor {
        /// Where the descriptor appeared.
        location: String,
    },

    /// An `array` descriptor without `items`.
    #[error("{location}: array descriptor is missing `items`")]
    MissingItems {
        /// Where the descriptor appeared.
        location: String,
    },

    /// A reference names a domain that does not exist.
    #[error("{location}: reference '{reference}' names unknown domain '{domain}'")]
    UnknownDomain {
        /// Where the reference appeared.
        location: String,
        /// The reference as written.
        reference: String,
        /// The missing domain.
        domain: String,
    },

    /// A reference names a type that its domain does not declare.
    #[error("{location}: type '{type_name}' not found in domain '{domain}'")]
    MissingType {
        /// Where the reference appeared.
        location: String,
        /// Domain that was searched.
        domain: String,
        /// The missing type.
        type_name: String,
    },

    /// A reference query was made on a non-reference.
    #[error(transparent)]
    InvalidQuery(#[from] ir::InvalidQuery),

    /// The schema itself could not be loaded.
    #[error(transparent)]
    Schema(#[from] schema::SchemaError),
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
