//! The registry bootstrapper: walks the import tree from a root source
//! and populates the registry.

use std::collections::HashSet;

use crate::registry::{Registry, ResolveError};
use crate::types::{Catalog, ConfigSource, Import, SourceRef};

/// Resolve the transitive set of descriptors reachable from `root`.
///
/// Traversal is depth-first in declaration order, root first: a source's
/// own descriptors are registered before its imports are processed.
/// Selector-produced names recurse like declared imports; registrars run
/// in place against the registry. A source reached more than once is
/// resolved once; a source reached while still in progress is a circular
/// import and fails.
pub fn resolve(catalog: &Catalog, root: &str) -> Result<Registry, ResolveError> {
    let root_source = catalog.get(root).ok_or_else(|| ResolveError::UnknownSource {
        name: root.to_string(),
    })?;

    let mut registry = Registry::new();
    let mut resolved = HashSet::new();
    let mut in_progress = Vec::new();

    resolve_source(
        catalog,
        root_source,
        &mut registry,
        &mut resolved,
        &mut in_progress,
    )?;
    tracing::debug!(
        root = %root,
        components = registry.len(),
        "resolution complete"
    );
    Ok(registry)
}

fn resolve_source(
    catalog: &Catalog,
    source: &ConfigSource,
    registry: &mut Registry,
    resolved: &mut HashSet<String>,
    in_progress: &mut Vec<String>,
) -> Result<(), ResolveError> {
    if resolved.contains(&source.name) {
        tracing::debug!(source = %source.name, "source already resolved, skipping");
        return Ok(());
    }
    if in_progress.iter().any(|name| name == &source.name) {
        return Err(ResolveError::CircularImport {
            name: source.name.clone(),
        });
    }
    in_progress.push(source.name.clone());

    for descriptor in &source.descriptors {
        registry.register(descriptor.clone())?;
    }

    let origin = SourceRef {
        name: source.name.clone(),
    };
    for import in &source.imports {
        match import {
            Import::Source(name) => {
                resolve_named(catalog, source, name, registry, resolved, in_progress)?;
            }
            Import::Selector(selector) => {
                for name in selector(&origin) {
                    resolve_named(catalog, source, &name, registry, resolved, in_progress)?;
                }
            }
            Import::Registrar(registrar) => {
                registrar(&origin, registry)?;
            }
        }
    }

    in_progress.pop();
    resolved.insert(source.name.clone());
    Ok(())
}

fn resolve_named(
    catalog: &Catalog,
    importer: &ConfigSource,
    name: &str,
    registry: &mut Registry,
    resolved: &mut HashSet<String>,
    in_progress: &mut Vec<String>,
) -> Result<(), ResolveError> {
    let target = catalog
        .get(name)
        .ok_or_else(|| ResolveError::UnresolvedImport {
            source: importer.name.clone(),
            name: name.to_string(),
        })?;
    resolve_source(catalog, target, registry, resolved, in_progress)
}
