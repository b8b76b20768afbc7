#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
//! Command-line front end of the protogen compiler.
//!
//! `protogen generate` compiles the CDP schema documents into Rust modules,
//! `protogen dump-model` writes the resolved model as JSON and `protogen diff`
//! compares two sets of schema documents.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use config::Config;
use pipeline::GenerationContext;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during protogen operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    /// Logging could not be initialized.
    #[error(transparent)]
    Logging(#[from] logging::LoggingError),
    /// A pipeline stage failed.
    #[error(transparent)]
    Pipeline(#[from] pipeline::PipelineError),
    /// The diff report could not be serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Writing to stdout failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for protogen operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Command-line interface configuration for protogen.
#[derive(Parser, Debug)]
#[command(name = "protogen", about = "Chrome DevTools Protocol binding compiler", version)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to run
    pub cmd: Commands,
    /// Configuration file (defaults to the user config file when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log level or filter directive, overriding the configuration
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

/// Available protogen commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate Rust bindings from the schema documents
    Generate(GenerateArgs),
    /// Write the resolved protocol model as JSON
    DumpModel {
        /// Destination file
        #[arg(long)]
        output: PathBuf,
        /// Schema documents (defaults to the configured ones)
        inputs: Vec<PathBuf>,
    },
    /// Print the difference between two sets of schema documents as JSON
    Diff {
        /// Documents of the old protocol
        #[arg(long, num_args = 1.., required = true)]
        old: Vec<PathBuf>,
        /// Documents of the new protocol
        #[arg(long, num_args = 1.., required = true)]
        new: Vec<PathBuf>,
    },
}

/// Flags of `protogen generate`; each overrides its configuration value.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Browser protocol document
    #[arg(long)]
    pub browser_protocol: Option<PathBuf>,
    /// JavaScript protocol document
    #[arg(long)]
    pub js_protocol: Option<PathBuf>,
    /// Output directory
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Run rustfmt over the generated files
    #[arg(long)]
    pub rustfmt: bool,
    /// Skip writing manifest.json
    #[arg(long)]
    pub no_manifest: bool,
}

impl GenerateArgs {
    /// Resolve the generation inputs, flags taking precedence over `config`.
    pub fn context(&self, config: &Config) -> Result<GenerationContext> {
        let mut builder = GenerationContext::from_config(config);
        if let Some(path) = &self.browser_protocol {
            builder = builder.browser_protocol(path.clone());
        }
        if let Some(path) = &self.js_protocol {
            builder = builder.js_protocol(path.clone());
        }
        if let Some(dir) = &self.output {
            builder = builder.output_dir(dir.clone());
        }
        if self.rustfmt {
            builder = builder.rustfmt(true);
        }
        if self.no_manifest {
            builder = builder.manifest(false);
        }
        Ok(builder.build()?)
    }
}

/// Load the configuration named by `--config`, or the default one.
pub fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Ok(Config::from_file(path)?),
        None => Ok(Config::load_or_default()?),
    }
}

/// Run `cli`, writing user-facing output to `out`.
pub fn execute(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let config = load_config(&cli)?;
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    logging::init(level, config.logging.file.as_deref())?;
    debug!(?cli, "parsed command line");

    match cli.cmd {
        Commands::Generate(args) => {
            let ctx = args.context(&config)?;
            let report = pipeline::run(&ctx)?;
            writeln!(
                out,
                "Generated {} files for {} domains (protocol {}) into {}",
                report.files.len(),
                report.order.len(),
                report.version,
                report.output_dir.display()
            )?;
        }
        Commands::DumpModel { output, inputs } => {
            let inputs = if inputs.is_empty() { config.schema_paths().to_vec() } else { inputs };
            let model = pipeline::dump_model(&inputs, &output)?;
            writeln!(
                out,
                "Model with {} domains written to {}",
                model.domains.len(),
                output.display()
            )?;
        }
        Commands::Diff { old, new } => {
            let diff = pipeline::diff_files(&old, &new)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&diff)?)?;
        }
    }
    Ok(())
}
