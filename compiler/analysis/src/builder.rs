//! Domain Model Builder
//!
//! Resolves every type, command and event of a [`ProtocolDocument`] and assembles
//! the [`ProtocolModel`]. Any dangling reference aborts the whole build.
//!
//! Dependencies are the union of what a domain declares and every domain it
//! references through a `ForeignRef`. Inconsistencies between the two are logged,
//! never rejected.

use std::collections::BTreeSet;

use ir::{
    DomainModel, ProtocolModel, ResolvedCommand, ResolvedEvent, ResolvedParam, ResolvedType,
    TypeRef, TypeShape,
};
use schema::{DomainSpec, ParamSpec, ProtocolDocument, TypeSpec};
use tracing::{debug, info, warn};

use crate::ordering::emission_order;
use crate::resolver::TypeResolver;
use crate::Result;

/// Build the resolved model for `document`.
pub fn build(document: &ProtocolDocument) -> Result<ProtocolModel> {
    ModelBuilder::new(document).build()
}

/// Builds a [`ProtocolModel`] from a document.
#[derive(Debug, Clone, Copy)]
pub struct ModelBuilder<'a> {
    document: &'a ProtocolDocument,
    resolver: TypeResolver<'a>,
}

impl<'a> ModelBuilder<'a> {
    /// Create a builder over `document`.
    pub fn new(document: &'a ProtocolDocument) -> Self {
        Self { document, resolver: TypeResolver::new(document) }
    }

    /// Resolve every domain and compute the emission order.
    pub fn build(&self) -> Result<ProtocolModel> {
        let domains = self
            .document
            .domains
            .iter()
            .map(|domain| self.build_domain(domain))
            .collect::<Result<Vec<_>>>()?;
        let order = emission_order(&domains);

        info!(
            domains = domains.len(),
            version = %self.document.version,
            "resolved protocol model"
        );
        Ok(ProtocolModel { version: self.document.version.clone(), domains, order })
    }

    /// Resolve one domain.
    pub fn build_domain(&self, spec: &DomainSpec) -> Result<DomainModel> {
        let mut referenced = BTreeSet::new();

        let types = spec
            .types
            .iter()
            .map(|t| self.build_type(spec, t, &mut referenced))
            .collect::<Result<Vec<_>>>()?;

        let commands = spec
            .commands
            .iter()
            .map(|c| -> Result<ResolvedCommand> {
                let location = format!("{}.{}", spec.name, c.name);
                Ok(ResolvedCommand {
                    name: c.name.clone(),
                    description: c.description.clone(),
                    deprecated: c.deprecated,
                    experimental: c.experimental,
                    parameters: self.build_params(spec, &location, &c.parameters, &mut referenced)?,
                    returns: self.build_params(
                        spec,
                        &format!("{}:returns", location),
                        &c.returns,
                        &mut referenced,
                    )?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let events = spec
            .events
            .iter()
            .map(|e| -> Result<ResolvedEvent> {
                let location = format!("{}.{}", spec.name, e.name);
                Ok(ResolvedEvent {
                    name: e.name.clone(),
                    description: e.description.clone(),
                    deprecated: e.deprecated,
                    experimental: e.experimental,
                    parameters: self.build_params(spec, &location, &e.parameters, &mut referenced)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let dependencies = self.merge_dependencies(spec, &referenced);
        debug!(
            domain = %spec.name,
            types = types.len(),
            commands = commands.len(),
            events = events.len(),
            dependencies = dependencies.len(),
            "resolved domain"
        );

        Ok(DomainModel {
            name: spec.name.clone(),
            description: spec.description.clone(),
            deprecated: spec.deprecated,
            experimental: spec.experimental,
            declared_dependencies: spec.dependencies.clone(),
            dependencies,
            types,
            commands,
            events,
        })
    }

    fn build_type(
        &self,
        domain: &DomainSpec,
        spec: &TypeSpec,
        referenced: &mut BTreeSet<String>,
    ) -> Result<ResolvedType> {
        let location = format!("{}.{}", domain.name, spec.id);
        let descriptor = &spec.descriptor;

        let shape = match (&descriptor.reference, &descriptor.enum_values, &spec.properties) {
            (None, Some(values), _) => TypeShape::Enum(values.clone()),
            (None, None, Some(props))
                if descriptor.kind.as_deref() == Some("object") && !props.is_empty() =>
            {
                TypeShape::Object(self.build_params(domain, &location, props, referenced)?)
            }
            _ => {
                let ty = self.resolver.resolve_checked(descriptor, &domain.name, &location)?;
                record_foreign(&ty, &domain.name, referenced);
                TypeShape::Alias(ty)
            }
        };

        Ok(ResolvedType {
            name: spec.id.clone(),
            description: spec.description.clone(),
            deprecated: spec.deprecated,
            experimental: spec.experimental,
            shape,
        })
    }

    fn build_params(
        &self,
        domain: &DomainSpec,
        location: &str,
        params: &[ParamSpec],
        referenced: &mut BTreeSet<String>,
    ) -> Result<Vec<ResolvedParam>> {
        params
            .iter()
            .map(|p| -> Result<ResolvedParam> {
                let param_location = format!("{}.{}", location, p.name);
                let ty =
                    self.resolver.resolve_checked(&p.descriptor, &domain.name, &param_location)?;
                record_foreign(&ty, &domain.name, referenced);
                Ok(ResolvedParam {
                    name: p.name.clone(),
                    enum_values: ty
                        .is_primitive()
                        .then(|| p.descriptor.enum_values.clone())
                        .flatten(),
                    ty,
                    optional: p.optional,
                    description: p.description.clone(),
                    deprecated: p.deprecated,
                    experimental: p.experimental,
                })
            })
            .collect()
    }

    fn merge_dependencies(
        &self,
        spec: &DomainSpec,
        referenced: &BTreeSet<String>,
    ) -> BTreeSet<String> {
        for declared in &spec.dependencies {
            if !self.document.contains_domain(declared) {
                warn!(
                    domain = %spec.name,
                    dependency = %declared,
                    "declared dependency on a domain that does not exist; ignored for ordering"
                );
            }
        }
        for used in referenced {
            if !spec.dependencies.contains(used) {
                warn!(
                    domain = %spec.name,
                    dependency = %used,
                    "domain references a dependency it does not declare"
                );
            }
        }

        spec.dependencies
            .iter()
            .filter(|d| *d != &spec.name)
            .chain(referenced.iter())
            .cloned()
            .collect()
    }
}

/// Note the domain of a foreign reference, looking through arrays.
fn record_foreign(ty: &TypeRef, owning_domain: &str, referenced: &mut BTreeSet<String>) {
    if let TypeRef::ForeignRef(domain, _) = ty.innermost() {
        if domain != owning_domain {
            referenced.insert(domain.clone());
        }
    }
}
