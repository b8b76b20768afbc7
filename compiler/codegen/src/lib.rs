#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Code generation for Chrome DevTools Protocol bindings.
//!
//! This crate turns a resolved [`ProtocolModel`] into Rust source: per domain a
//! `types.rs`, an `events.rs`, a `client.rs` and a `mod.rs`, plus a root
//! `mod.rs` listing the domains in emission order.
//!
//! Rendering happens entirely in memory. An [`OutputSink`] only receives files
//! once every domain rendered, so a failure never leaves a partial tree behind.
//! Output is deterministic: the same model always renders to the same bytes.
//!
//! The generated code depends on `serde`, `serde_json` and `protogen-transport`
//! (imported as `transport`).

pub mod context;
pub mod generators;
pub mod rust_types;

/// Sub-crate: **`utils`**
///
/// Identifier mapping from schema names to Rust names.
pub mod utils;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use ir::ProtocolModel;
use thiserror::Error;
use tracing::{debug, info, warn};

pub use context::DomainContext;
pub use generators::{ClientGenerator, DomainModGenerator, EventsGenerator, TypesGenerator};
use rust_types::RecursionIndex;

/// Line carried in the module docs of every generated file.
pub const GENERATED_NOTICE: &str = "Generated by protogen. Do not edit.";

/// Error type for code generation operations in this crate.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Underlying I/O error while reading or writing files.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// JSON serialization/deserialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Formatting error when building generated source.
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
    /// Generic message-based error.
    #[error("{0}")]
    Message(String),
}

impl From<String> for CodegenError {
    fn from(msg: String) -> Self { CodegenError::Message(msg) }
}

/// Convenient result type for codegen functions in this crate.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Defines the interface for rendering the units of one domain module.
///
/// Implementors produce `(file name, source)` pairs; file names are relative to
/// the domain's directory.
pub trait CodeGenerator {
    /// Render the files of this unit for the domain in `ctx`.
    fn generate(&self, ctx: &DomainContext<'_>) -> Result<Vec<(String, String)>>;
}

/// A rendered file, with its path relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative path using `/` separators, e.g. `page/client.rs`.
    pub path: String,
    /// Cleaned source text.
    pub contents: String,
}

/// Destination for rendered files.
pub trait OutputSink {
    /// Store `contents` at `path`, relative to the sink's root.
    fn write_file(&mut self, path: &str, contents: &str) -> Result<()>;
}

/// Writes files below a directory, creating subdirectories as needed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
    rustfmt: bool,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Sink rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), rustfmt: false, written: Vec::new() }
    }

    /// Run `rustfmt` on every `.rs` file after writing it.
    pub fn with_rustfmt(mut self, enabled: bool) -> Self {
        self.rustfmt = enabled;
        self
    }

    /// Root directory.
    pub fn root(&self) -> &Path { &self.root }

    /// Files written so far, in write order.
    pub fn written(&self) -> &[PathBuf] { &self.written }
}

impl OutputSink for DirectorySink {
    fn write_file(&mut self, path: &str, contents: &str) -> Result<()> {
        let target = path.split('/').fold(self.root.clone(), |acc, part| acc.join(part));
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, contents.as_bytes())?;
        if self.rustfmt && path.ends_with(".rs") {
            format_with_rustfmt(&target);
        }
        self.written.push(target);
        Ok(())
    }
}

/// Keeps files in memory, keyed by relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    files: BTreeMap<String, String>,
}

impl MemorySink {
    /// Empty sink.
    pub fn new() -> Self { Self::default() }

    /// Contents stored at `path`.
    pub fn get(&self, path: &str) -> Option<&str> { self.files.get(path).map(String::as_str) }

    /// All files, sorted by path.
    pub fn files(&self) -> &BTreeMap<String, String> { &self.files }

    /// Number of files.
    pub fn len(&self) -> usize { self.files.len() }

    /// Whether nothing was written.
    pub fn is_empty(&self) -> bool { self.files.is_empty() }
}

impl OutputSink for MemorySink {
    fn write_file(&mut self, path: &str, contents: &str) -> Result<()> {
        self.files.insert(path.to_string(), contents.to_string());
        Ok(())
    }
}

/// Walks the model in emission order and renders every unit of every domain.
pub struct Emitter {
    generators: Vec<Box<dyn CodeGenerator>>,
}

impl Default for Emitter {
    fn default() -> Self {
        Self {
            generators: vec![
                Box::new(TypesGenerator),
                Box::new(EventsGenerator),
                Box::new(ClientGenerator),
                Box::new(DomainModGenerator),
            ],
        }
    }
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter").field("generators", &self.generators.len()).finish()
    }
}

impl Emitter {
    /// Emitter with the standard units.
    pub fn new() -> Self { Self::default() }

    /// Render everything, then hand the files to `sink`.
    ///
    /// Nothing reaches the sink unless every domain rendered.
    pub fn emit(&self, model: &ProtocolModel, sink: &mut dyn OutputSink) -> Result<()> {
        let files = self.render(model)?;
        for file in &files {
            sink.write_file(&file.path, &file.contents)?;
        }
        info!(files = files.len(), "emitted generated sources");
        Ok(())
    }

    /// Render every file in memory, domains in emission order.
    pub fn render(&self, model: &ProtocolModel) -> Result<Vec<GeneratedFile>> {
        let recursion = RecursionIndex::new(model);
        let mut files = Vec::new();
        let mut dirs = BTreeSet::new();

        for name in &model.order {
            let domain = model.domain(name).ok_or_else(|| {
                CodegenError::Message(format!("emission order names unknown domain '{}'", name))
            })?;
            let ctx = DomainContext::new(model, domain, &recursion);
            let dir = ctx.module_dir();
            if !dirs.insert(dir.clone()) {
                return Err(CodegenError::Message(format!(
                    "domain '{}' maps to module '{}', which is already taken",
                    name, dir
                )));
            }

            for generator in &self.generators {
                for (file, source) in generator.generate(&ctx)? {
                    files.push(GeneratedFile {
                        path: format!("{}/{}", dir, file),
                        contents: clean_generated_source(&source),
                    });
                }
            }
            debug!(domain = %name, module = %dir, "rendered domain");
        }

        files.push(GeneratedFile {
            path: "mod.rs".to_string(),
            contents: clean_generated_source(&generators::mod_unit::render_root_mod(model)?),
        });
        Ok(files)
    }
}

/// Formats a Rust source file with `rustfmt`, best-effort.
///
/// Returns whether `rustfmt` ran and succeeded. Failure to spawn is logged and
/// otherwise ignored.
pub fn format_with_rustfmt(path: &Path) -> bool {
    let mut cmd = Command::new("rustfmt");
    cmd.arg("--edition=2021").arg(path);

    match cmd.status() {
        Ok(status) if status.success() => true,
        Ok(status) => {
            warn!(path = %path.display(), %status, "rustfmt failed; keeping unformatted source");
            false
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not run rustfmt");
            false
        }
    }
}

/// Trim trailing whitespace from each line and drop trailing blank lines.
/// Always ensures the returned string ends with a single newline when not empty.
pub fn clean_generated_source(src: &str) -> String {
    let mut lines: Vec<&str> = src.lines().map(str::trim_end).collect();

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    }
}
