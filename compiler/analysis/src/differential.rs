//! Differential Analysis
//!
//! Compares two schema documents and reports what was added, removed or changed
//! between them. Every member is named `Domain.member`; every list is sorted, so
//! the report is stable across runs and suitable for review diffs.

use std::collections::BTreeSet;

use schema::{DomainSpec, ParamSpec, ProtocolDocument, ProtocolVersion};
use serde::{Deserialize, Serialize};

/// Difference between two protocol documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDiff {
    /// Version of the old document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_version: Option<ProtocolVersion>,
    /// Version of the new document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_version: Option<ProtocolVersion>,
    /// Domains only in the new document
    pub added_domains: Vec<String>,
    /// Domains only in the old document
    pub removed_domains: Vec<String>,
    /// Commands only in the new document
    pub added_commands: Vec<String>,
    /// Commands only in the old document
    pub removed_commands: Vec<String>,
    /// Commands in both whose parameters or returns differ
    pub changed_commands: Vec<String>,
    /// Events only in the new document
    pub added_events: Vec<String>,
    /// Events only in the old document
    pub removed_events: Vec<String>,
    /// Types only in the new document
    pub added_types: Vec<String>,
    /// Types only in the old document
    pub removed_types: Vec<String>,
}

impl SchemaDiff {
    /// Compute the difference from `old` to `new`.
    pub fn between(old: &ProtocolDocument, new: &ProtocolDocument) -> Self {
        let mut diff = SchemaDiff {
            old_version: Some(old.version.clone()),
            new_version: Some(new.version.clone()),
            ..SchemaDiff::default()
        };

        let old_domains = names(old.domains.iter().map(|d| d.name.clone()));
        let new_domains = names(new.domains.iter().map(|d| d.name.clone()));
        diff.added_domains = new_domains.difference(&old_domains).cloned().collect();
        diff.removed_domains = old_domains.difference(&new_domains).cloned().collect();

        diff.added_commands = members_only_in(new, old, commands_of);
        diff.removed_commands = members_only_in(old, new, commands_of);
        diff.added_events = members_only_in(new, old, events_of);
        diff.removed_events = members_only_in(old, new, events_of);
        diff.added_types = members_only_in(new, old, types_of);
        diff.removed_types = members_only_in(old, new, types_of);

        let mut changed = BTreeSet::new();
        for old_domain in &old.domains {
            let Some(new_domain) = new.domain(&old_domain.name) else { continue };
            for old_cmd in &old_domain.commands {
                if let Some(new_cmd) = new_domain.command(&old_cmd.name) {
                    if signature(&old_cmd.parameters) != signature(&new_cmd.parameters)
                        || signature(&old_cmd.returns) != signature(&new_cmd.returns)
                    {
                        changed.insert(format!("{}.{}", old_domain.name, old_cmd.name));
                    }
                }
            }
        }
        diff.changed_commands = changed.into_iter().collect();

        diff
    }

    /// Whether the two documents declare the same members.
    pub fn is_empty(&self) -> bool {
        self.added_domains.is_empty()
            && self.removed_domains.is_empty()
            && self.added_commands.is_empty()
            && self.removed_commands.is_empty()
            && self.changed_commands.is_empty()
            && self.added_events.is_empty()
            && self.removed_events.is_empty()
            && self.added_types.is_empty()
            && self.removed_types.is_empty()
    }

    /// One-line summary.
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "No differences".to_string();
        }
        format!(
            "domains +{}/-{}, commands +{}/-{}/~{}, events +{}/-{}, types +{}/-{}",
            self.added_domains.len(),
            self.removed_domains.len(),
            self.added_commands.len(),
            self.removed_commands.len(),
            self.changed_commands.len(),
            self.added_events.len(),
            self.removed_events.len(),
            self.added_types.len(),
            self.removed_types.len(),
        )
    }
}

fn names(iter: impl Iterator<Item = String>) -> BTreeSet<String> { iter.collect() }

fn commands_of(d: &DomainSpec) -> Vec<&str> { d.commands.iter().map(|c| c.name.as_str()).collect() }

fn events_of(d: &DomainSpec) -> Vec<&str> { d.events.iter().map(|e| e.name.as_str()).collect() }

fn types_of(d: &DomainSpec) -> Vec<&str> { d.types.iter().map(|t| t.id.as_str()).collect() }

/// Qualified members of `left` that `right` does not have.
fn members_only_in(
    left: &ProtocolDocument,
    right: &ProtocolDocument,
    members: fn(&DomainSpec) -> Vec<&str>,
) -> Vec<String> {
    let qualified = |doc: &ProtocolDocument| -> BTreeSet<String> {
        doc.domains
            .iter()
            .flat_map(|d| members(d).into_iter().map(move |m| format!("{}.{}", d.name, m)))
            .collect()
    };
    let left = qualified(left);
    let right = qualified(right);
    left.difference(&right).cloned().collect()
}

/// Wire-relevant shape of a parameter list; descriptions are ignored.
fn signature(params: &[ParamSpec]) -> Vec<(&str, bool, &schema::TypeDescriptor)> {
    params.iter().map(|p| (p.name.as_str(), p.optional, &p.descriptor)).collect()
}
