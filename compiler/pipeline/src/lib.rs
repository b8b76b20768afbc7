#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! High-level pipeline that compiles CDP schema documents into Rust bindings.
//!
//! The pipeline is organized into focused modules:
//!
//! - `generation_context` - Inputs of one run, built from config and flags
//! - `orchestration` - Entry points (`run`, `dump_model`, `diff_files`)
//! - `manifest` - Digest summary written next to the generated modules

use thiserror::Error;

/// Convenient result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while running the codegen pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Schema documents could not be read or merged.
    #[error(transparent)]
    Schema(#[from] schema::SchemaError),
    /// Type resolution or model construction failed.
    #[error(transparent)]
    Analysis(#[from] analysis::AnalysisError),
    /// Error propagated from the codegen crate.
    #[error(transparent)]
    Codegen(#[from] codegen::CodegenError),
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    /// I/O error while creating or writing files.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// JSON serialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// The output directory holds files protogen did not generate.
    #[error(
        "refusing to replace '{}': it is not empty and was not generated by protogen",
        .0.display()
    )]
    UnmanagedOutput(std::path::PathBuf),
    /// Generic message-based error.
    #[error("{0}")]
    Message(String),
}

pub mod generation_context;
pub mod manifest;
pub mod orchestration;

pub use generation_context::{GenerationContext, GenerationContextBuilder};
pub use manifest::Manifest;
pub use orchestration::{diff_files, dump_model, load_model, run, GenerationReport};
