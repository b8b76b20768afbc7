//! Schema loading.
//!
//! Domains from every input document are concatenated in input order. The version is
//! taken from the first document. Loading either yields a complete document or an
//! error; there is no partial result.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::document::{DomainSpec, ProtocolDocument};
use crate::version::{ProtocolVersion, VersionPart};
use crate::{Result, SchemaError};

/// Top-level shape of a schema document. Domains stay raw so that errors can name
/// the offending entry.
#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    version: Option<RawVersion>,
    domains: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawVersion {
    major: VersionPart,
    minor: VersionPart,
}

/// Load already-parsed schema documents into one [`ProtocolDocument`].
pub fn load(documents: &[Value]) -> Result<ProtocolDocument> {
    if documents.is_empty() {
        return Err(SchemaError::Parse("no schema documents supplied".to_string()));
    }

    let mut version = None;
    let mut domains: Vec<DomainSpec> = Vec::new();
    let mut seen = BTreeSet::new();

    for (doc_index, document) in documents.iter().enumerate() {
        let raw: RawDocument = serde_json::from_value(document.clone())
            .map_err(|e| SchemaError::Parse(format!("document {}: {}", doc_index, e)))?;

        if doc_index == 0 {
            let raw_version = raw.version.as_ref().ok_or_else(|| {
                SchemaError::Parse("document 0: missing field `version`".to_string())
            })?;
            version = Some(
                ProtocolVersion::from_parts(&raw_version.major, &raw_version.minor)
                    .map_err(|e| SchemaError::Parse(format!("document 0: {}", e)))?,
            );
        }

        debug!(document = doc_index, domains = raw.domains.len(), "loading schema document");

        for (domain_index, value) in raw.domains.into_iter().enumerate() {
            let domain: DomainSpec = serde_json::from_value(value).map_err(|e| {
                let at = format!("document {}, domain {}", doc_index, domain_index);
                SchemaError::Parse(format!("{}: {}", at, e))
            })?;
            check_unique_members(&domain)?;
            if !seen.insert(domain.name.clone()) {
                return Err(SchemaError::DuplicateDomain(domain.name));
            }
            domains.push(domain);
        }
    }

    let version = version
        .ok_or_else(|| SchemaError::Parse("document 0: missing field `version`".to_string()))?;
    Ok(ProtocolDocument { version, domains })
}

/// Parse and load schema documents from JSON source text.
pub fn load_sources(sources: &[&str]) -> Result<ProtocolDocument> {
    let documents = sources
        .iter()
        .enumerate()
        .map(|(i, source)| {
            serde_json::from_str::<Value>(source)
                .map_err(|e| SchemaError::Parse(format!("document {}: {}", i, e)))
        })
        .collect::<Result<Vec<_>>>()?;
    load(&documents)
}

/// Read, parse and load schema documents from files, in the given order.
pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<ProtocolDocument> {
    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|source| SchemaError::Io { path: path.to_path_buf(), source })?;
        let document: Value = serde_json::from_str(&content)
            .map_err(|e| SchemaError::Parse(format!("{}: {}", path.display(), e)))?;
        documents.push(document);
    }
    load(&documents)
}

/// Type ids, command names and event names must be unique inside a domain.
fn check_unique_members(domain: &DomainSpec) -> Result<()> {
    let groups: [(&str, Vec<&str>); 3] = [
        ("type", domain.types.iter().map(|t| t.id.as_str()).collect()),
        ("command", domain.commands.iter().map(|c| c.name.as_str()).collect()),
        ("event", domain.events.iter().map(|e| e.name.as_str()).collect()),
    ];
    for (kind, names) in groups {
        let mut seen = BTreeSet::new();
        for name in names {
            if !seen.insert(name) {
                return Err(SchemaError::Parse(format!(
                    "domain '{}': duplicate {} '{}'",
                    domain.name, kind, name
                )));
            }
        }
    }
    Ok(())
}
