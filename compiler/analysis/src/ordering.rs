//! Emission order.
//!
//! Layered topological sort over domain dependencies. Each round places, in
//! declaration order, every remaining domain whose known dependencies were placed
//! in earlier rounds. A round that places nothing means a cycle; the first
//! remaining domain in declaration order is then placed on its own and the sort
//! continues. Cycles are never rejected.

use std::collections::BTreeSet;

use ir::DomainModel;
use tracing::debug;

/// Compute the emission order of `domains` (given in declaration order).
///
/// Dependencies on unknown domains and on the domain itself are ignored.
pub fn emission_order(domains: &[DomainModel]) -> Vec<String> {
    let known: BTreeSet<&str> = domains.iter().map(|d| d.name.as_str()).collect();
    let mut placed: BTreeSet<&str> = BTreeSet::new();
    let mut order: Vec<String> = Vec::with_capacity(domains.len());
    let mut remaining: Vec<&DomainModel> = domains.iter().collect();

    while !remaining.is_empty() {
        let ready: Vec<&DomainModel> = remaining
            .iter()
            .copied()
            .filter(|domain| {
                domain.dependencies.iter().all(|dep| {
                    dep == &domain.name
                        || !known.contains(dep.as_str())
                        || placed.contains(dep.as_str())
                })
            })
            .collect();

        let round = if ready.is_empty() {
            let forced = remaining[0];
            debug!(domain = %forced.name, "dependency cycle; placing in declaration order");
            vec![forced]
        } else {
            ready
        };

        for domain in round {
            placed.insert(domain.name.as_str());
            order.push(domain.name.clone());
        }
        remaining.retain(|d| !placed.contains(d.name.as_str()));
    }

    order
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn domain(name: &str, deps: &[&str]) -> DomainModel {
        DomainModel {
            name: name.to_string(),
            description: None,
            deprecated: false,
            experimental: false,
            declared_dependencies: deps.iter().map(|d| d.to_string()).collect(),
            dependencies: deps.iter().map(|d| d.to_string()).collect::<BTreeSet<_>>(),
            types: vec![],
            commands: vec![],
            events: vec![],
        }
    }

    #[test]
    fn dependency_free_domains_come_first_in_declaration_order() {
        let domains =
            vec![domain("Page", &["Runtime"]), domain("Security", &[]), domain("Runtime", &[])];
        assert_eq!(emission_order(&domains), vec!["Security", "Runtime", "Page"]);
    }

    #[test]
    fn layers_respect_transitive_dependencies() {
        let domains = vec![
            domain("C", &["B"]),
            domain("B", &["A"]),
            domain("A", &[]),
            domain("D", &["A"]),
        ];
        assert_eq!(emission_order(&domains), vec!["A", "B", "D", "C"]);
    }

    #[test]
    fn cycles_fall_back_to_declaration_order() {
        let domains = vec![domain("D1", &["D2"]), domain("D2", &["D1"]), domain("Root", &[])];
        assert_eq!(emission_order(&domains), vec!["Root", "D1", "D2"]);
    }

    #[test]
    fn unknown_and_self_dependencies_are_ignored() {
        let domains = vec![domain("A", &["A", "Ghost"]), domain("B", &["A"])];
        assert_eq!(emission_order(&domains), vec!["A", "B"]);
    }

    #[test]
    fn every_domain_is_emitted_exactly_once() {
        let domains = vec![
            domain("A", &["B", "C"]),
            domain("B", &["C", "A"]),
            domain("C", &["A", "B"]),
            domain("E", &["A"]),
        ];
        let order = emission_order(&domains);
        assert_eq!(order, vec!["A", "E", "B", "C"]);
    }

    #[test]
    fn empty_input() {
        assert!(emission_order(&[]).is_empty());
    }
}
