//! Generation context for the code generation pipeline.
//!
//! This module provides a unified context that encapsulates everything one
//! `generate` run needs: where the schema documents are, where output goes and
//! which optional passes run.

use std::path::PathBuf;

use config::Config;

use crate::PipelineError;

/// Context containing all inputs of one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationContext {
    /// Schema documents in load order (browser protocol first)
    pub schema_paths: Vec<PathBuf>,
    /// Directory that receives the generated modules
    pub output_dir: PathBuf,
    /// Run `rustfmt` over each written file
    pub rustfmt: bool,
    /// Write `manifest.json` next to the generated modules
    pub manifest: bool,
}

impl GenerationContext {
    /// Create a new builder for GenerationContext
    pub fn builder() -> GenerationContextBuilder { GenerationContextBuilder::default() }

    /// Builder seeded from a loaded configuration
    pub fn from_config(config: &Config) -> GenerationContextBuilder {
        let output_dir = if config.codegen.output_dir.as_os_str().is_empty() {
            Config::default_output_dir()
        } else {
            config.codegen.output_dir.clone()
        };
        GenerationContextBuilder::default()
            .schema_paths(config.schema_paths().to_vec())
            .output_dir(output_dir)
            .rustfmt(config.codegen.rustfmt)
            .manifest(config.codegen.manifest)
    }
}

#[derive(Debug, Default)]
/// Builder for GenerationContext
pub struct GenerationContextBuilder {
    schema_paths: Option<Vec<PathBuf>>,
    output_dir: Option<PathBuf>,
    rustfmt: Option<bool>,
    manifest: Option<bool>,
}

impl GenerationContextBuilder {
    /// Set every schema document at once
    pub fn schema_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.schema_paths = Some(paths);
        self
    }

    /// Replace the browser protocol document (first input)
    pub fn browser_protocol(self, path: PathBuf) -> Self { self.replace_input(0, path) }

    /// Replace the JS protocol document (second input)
    pub fn js_protocol(self, path: PathBuf) -> Self { self.replace_input(1, path) }

    fn replace_input(mut self, index: usize, path: PathBuf) -> Self {
        let paths = self.schema_paths.get_or_insert_with(Vec::new);
        if paths.len() > index {
            paths[index] = path;
        } else {
            paths.push(path);
        }
        self
    }

    /// Set the output directory
    pub fn output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }

    /// Enable or disable the rustfmt pass
    pub fn rustfmt(mut self, enabled: bool) -> Self {
        self.rustfmt = Some(enabled);
        self
    }

    /// Enable or disable the manifest
    pub fn manifest(mut self, enabled: bool) -> Self {
        self.manifest = Some(enabled);
        self
    }

    /// Build the GenerationContext
    pub fn build(self) -> Result<GenerationContext, PipelineError> {
        let schema_paths = self
            .schema_paths
            .filter(|paths| !paths.is_empty())
            .ok_or_else(|| PipelineError::Message("no schema documents configured".to_string()))?;
        let output_dir = self
            .output_dir
            .ok_or_else(|| PipelineError::Message("output directory is required".to_string()))?;

        Ok(GenerationContext {
            schema_paths,
            output_dir,
            rustfmt: self.rustfmt.unwrap_or(false),
            manifest: self.manifest.unwrap_or(true),
        })
    }
}
