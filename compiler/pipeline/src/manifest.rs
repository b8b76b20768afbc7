//! Output manifest.
//!
//! `manifest.json` records what a generation run produced: the protocol
//! version, the emission order and a SHA-256 digest per generated file. Paths
//! are sorted, so two runs over the same input write identical manifests.

use std::collections::BTreeMap;
use std::path::Path;

use codegen::GeneratedFile;
use ir::ProtocolModel;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::Result;

/// File name of the manifest inside the output directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Summary of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Protocol version, `major.minor`.
    pub protocol_version: String,
    /// Domain names in emission order.
    pub emission_order: Vec<String>,
    /// Relative path to lowercase hex SHA-256 of the file contents.
    pub files: BTreeMap<String, String>,
}

impl Manifest {
    /// Describe `files` rendered from `model`.
    pub fn new(model: &ProtocolModel, files: &[GeneratedFile]) -> Self {
        Self {
            protocol_version: model.version.to_string(),
            emission_order: model.order.clone(),
            files: files.iter().map(|f| (f.path.clone(), digest(&f.contents))).collect(),
        }
    }

    /// Pretty JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(self)?))
    }

    /// Write to `dir/manifest.json`.
    pub fn write(&self, dir: &Path) -> Result<()> {
        std::fs::write(dir.join(MANIFEST_FILE), self.to_json()?)?;
        Ok(())
    }

    /// Read `dir/manifest.json`.
    pub fn read(dir: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(dir.join(MANIFEST_FILE))?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Lowercase hex SHA-256 of `contents`.
pub fn digest(contents: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(contents.as_bytes());
    format!("{:x}", hasher.finalize())
}
