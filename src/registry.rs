//! The resolved registry: component name to descriptor, in registration order.

use std::collections::HashMap;

use crate::types::{ComponentDescriptor, Instance};

/// Errors surfaced while resolving a configuration source tree.
///
/// All of these are configuration-time failures. None are retried.
// Display/Error are implemented by hand: thiserror unconditionally treats
// a field named `source` as the error source, which does not compile for
// the `String` fields below.
#[derive(Debug)]
pub enum ResolveError {
    /// Two descriptors claimed the same component name. Collisions are
    /// always fatal; the registry never overwrites silently.
    DuplicateName { name: String },

    /// An import (declared or selector-produced) named a source that is
    /// not in the catalog.
    UnresolvedImport { source: String, name: String },

    /// A source was reached again while still being resolved.
    CircularImport { name: String },

    /// Two catalog sources claimed the same source name.
    DuplicateSource { name: String },

    /// The requested root source is not in the catalog.
    UnknownSource { name: String },

    /// A component name was looked up that is not registered.
    UnknownComponent { name: String },

    /// A registrar callback failed for a reason of its own.
    Registrar { source: String, message: String },
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::DuplicateName { name } => {
                write!(f, "duplicate component name: '{name}'")
            }
            ResolveError::UnresolvedImport { source, name } => {
                write!(f, "source '{source}' imports undefined source '{name}'")
            }
            ResolveError::CircularImport { name } => {
                write!(f, "circular import detected involving '{name}'")
            }
            ResolveError::DuplicateSource { name } => {
                write!(f, "duplicate source name: '{name}'")
            }
            ResolveError::UnknownSource { name } => {
                write!(f, "unknown root source: '{name}'")
            }
            ResolveError::UnknownComponent { name } => {
                write!(f, "unknown component: '{name}'")
            }
            ResolveError::Registrar { source, message } => {
                write!(f, "registrar failed in source '{source}': {message}")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Mapping from component name to descriptor.
///
/// Registration order is preserved; names are unique.
#[derive(Debug, Default)]
pub struct Registry {
    descriptors: HashMap<String, ComponentDescriptor>,
    order: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor, failing on a name collision.
    pub fn register(&mut self, descriptor: ComponentDescriptor) -> Result<(), ResolveError> {
        let name = descriptor.name().to_string();
        if self.descriptors.contains_key(&name) {
            return Err(ResolveError::DuplicateName { name });
        }
        tracing::debug!(component = %name, "registered component");
        self.order.push(name.clone());
        self.descriptors.insert(name, descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.descriptors.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Registered descriptors, in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ComponentDescriptor> {
        self.order.iter().map(|name| &self.descriptors[name])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Run the named descriptor's factory, producing a fresh instance.
    pub fn instantiate(&self, name: &str) -> Result<Instance, ResolveError> {
        self.descriptors
            .get(name)
            .map(ComponentDescriptor::instantiate)
            .ok_or_else(|| ResolveError::UnknownComponent {
                name: name.to_string(),
            })
    }
}
