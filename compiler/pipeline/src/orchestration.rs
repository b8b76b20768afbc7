//! Pipeline orchestration for the main entry points.
//!
//! A generation run loads the schema documents, builds the resolved model,
//! renders every file in memory and only then touches the filesystem. Files are
//! written into a staging directory next to the output directory, which replaces
//! the previous output once everything (manifest included) is on disk. A run
//! that fails at any stage leaves the existing output untouched.

use std::fs;
use std::path::{Path, PathBuf};

use analysis::SchemaDiff;
use codegen::{DirectorySink, Emitter, OutputSink};
use ir::ProtocolModel;
use tracing::{debug, info};

use crate::generation_context::GenerationContext;
use crate::manifest::{Manifest, MANIFEST_FILE};
use crate::{PipelineError, Result};

/// Outcome of a successful generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Protocol version of the merged input.
    pub version: String,
    /// Domain names in emission order.
    pub order: Vec<String>,
    /// Relative paths of the generated sources, in write order.
    pub files: Vec<String>,
    /// Directory holding the generated modules.
    pub output_dir: PathBuf,
    /// Path of `manifest.json`, when written.
    pub manifest: Option<PathBuf>,
}

/// Load schema documents and build the resolved model.
pub fn load_model<P: AsRef<Path>>(paths: &[P]) -> Result<ProtocolModel> {
    let document = schema::load_files(paths)?;
    info!(
        domains = document.domains.len(),
        version = %document.version,
        "loaded schema documents"
    );
    logging::trace("pipeline", &format!("merged {} documents", paths.len()));

    let model = analysis::build(&document)?;
    info!(
        types = model.type_count(),
        commands = model.command_count(),
        events = model.event_count(),
        "built protocol model"
    );
    Ok(model)
}

/// Run one generation: schema documents in, Rust modules out.
pub fn run(ctx: &GenerationContext) -> Result<GenerationReport> {
    ensure_replaceable(&ctx.output_dir)?;
    let model = load_model(&ctx.schema_paths)?;

    let files = Emitter::new().render(&model)?;
    info!(files = files.len(), "rendered bindings");

    let staging = staging_dir(&ctx.output_dir)?;
    if staging.exists() {
        fs::remove_dir_all(&staging)?;
    }
    fs::create_dir_all(&staging)?;

    let written = write_staged(ctx, &model, &files, &staging);
    if let Err(e) = written {
        let _ = fs::remove_dir_all(&staging);
        return Err(e);
    }

    if ctx.output_dir.exists() {
        fs::remove_dir_all(&ctx.output_dir)?;
    }
    fs::rename(&staging, &ctx.output_dir)?;
    info!(output = %ctx.output_dir.display(), "generation complete");

    Ok(GenerationReport {
        version: model.version.to_string(),
        order: model.order.clone(),
        files: files.into_iter().map(|f| f.path).collect(),
        output_dir: ctx.output_dir.clone(),
        manifest: ctx.manifest.then(|| ctx.output_dir.join(MANIFEST_FILE)),
    })
}

fn write_staged(
    ctx: &GenerationContext,
    model: &ProtocolModel,
    files: &[codegen::GeneratedFile],
    staging: &Path,
) -> Result<()> {
    let mut sink = DirectorySink::new(staging).with_rustfmt(ctx.rustfmt);
    for file in files {
        sink.write_file(&file.path, &file.contents)?;
    }
    debug!(staging = %staging.display(), written = sink.written().len(), "wrote staged files");

    if ctx.manifest {
        Manifest::new(model, files).write(staging)?;
        logging::trace("pipeline", "wrote manifest");
    }
    Ok(())
}

/// Only an empty directory or the output of an earlier run may be replaced.
///
/// Earlier output is recognized by its `manifest.json` or, for runs without a
/// manifest, by the notice in its root `mod.rs`.
fn ensure_replaceable(output_dir: &Path) -> Result<()> {
    if !output_dir.exists() {
        return Ok(());
    }
    if !output_dir.is_dir() {
        return Err(PipelineError::UnmanagedOutput(output_dir.to_path_buf()));
    }
    if fs::read_dir(output_dir)?.next().is_none() {
        return Ok(());
    }
    if output_dir.join(MANIFEST_FILE).is_file() {
        return Ok(());
    }
    let generated_root = fs::read_to_string(output_dir.join("mod.rs"))
        .map(|root| root.lines().take(4).any(|l| l.contains(codegen::GENERATED_NOTICE)))
        .unwrap_or(false);
    if generated_root {
        return Ok(());
    }
    Err(PipelineError::UnmanagedOutput(output_dir.to_path_buf()))
}

/// Sibling of `output_dir` used while a run is in progress.
fn staging_dir(output_dir: &Path) -> Result<PathBuf> {
    let name = output_dir.file_name().ok_or_else(|| {
        PipelineError::Message(format!(
            "output directory '{}' has no final component",
            output_dir.display()
        ))
    })?;
    let parent = match output_dir.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;
    Ok(parent.join(format!(".{}.staging", name.to_string_lossy())))
}

/// Build the model from `inputs` and write it to `output` as JSON.
pub fn dump_model<P: AsRef<Path>>(inputs: &[P], output: &Path) -> Result<ProtocolModel> {
    let model = load_model(inputs)?;
    model.to_file(output)?;
    info!(output = %output.display(), "wrote protocol model");
    Ok(model)
}

/// Compare two sets of schema documents.
pub fn diff_files<P: AsRef<Path>, Q: AsRef<Path>>(old: &[P], new: &[Q]) -> Result<SchemaDiff> {
    let old = schema::load_files(old)?;
    let new = schema::load_files(new)?;
    let diff = SchemaDiff::between(&old, &new);
    info!(summary = %diff.summary(), "compared schema documents");
    Ok(diff)
}
