//! Protogen CLI
//!
//! This binary provides the main entry point for protogen, offering
//! subcommands for code generation, model dumps and schema diffs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use clap::Parser;
use protogen_cli::{execute, Cli};

fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = execute(cli, &mut stdout) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
