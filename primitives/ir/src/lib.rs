#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Protogen resolved model
//!
//! This crate defines the structures produced by resolving a CDP schema document:
//! structural [`TypeRef`]s in place of `$ref` strings, and one [`DomainModel`] per
//! domain with its dependency set. The model is the bridge between the analysis
//! crate, which builds it, and the code generator, which consumes it.

pub mod protocol_ir;
pub mod type_ref;

pub use protocol_ir::*;
pub use type_ref::{InvalidQuery, Primitive, TypeRef};
