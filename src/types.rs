//! Core type definitions shared across the crate.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::registry::{Registry, ResolveError};

/// An instantiated component, produced by a descriptor's factory.
pub type Instance = Box<dyn Any + Send + Sync>;

/// Zero-argument factory producing one component instance.
pub type Factory = Arc<dyn Fn() -> Instance + Send + Sync>;

/// Callback returning additional source names to import,
/// decided at resolution time.
pub type Selector = Arc<dyn Fn(&SourceRef) -> Vec<String> + Send + Sync>;

/// Callback that registers descriptors directly into the registry,
/// bypassing declarative import.
pub type Registrar = Arc<dyn Fn(&SourceRef, &mut Registry) -> Result<(), ResolveError> + Send + Sync>;

/// Metadata about the importing source, handed to selectors and registrars.
#[derive(Debug, Clone)]
pub struct SourceRef {
    pub name: String,
}

/// A named recipe for producing one component instance.
///
/// Descriptors are immutable once registered. The optional config map
/// carries declarative property values for manifest-defined components.
#[derive(Clone)]
pub struct ComponentDescriptor {
    name: String,
    type_name: &'static str,
    config: Option<HashMap<String, serde_json::Value>>,
    factory: Factory,
}

impl ComponentDescriptor {
    /// Create a descriptor from a name and a factory closure.
    pub fn new<T, F>(name: impl Into<String>, factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            type_name: std::any::type_name::<T>(),
            config: None,
            factory: Arc::new(move || Box::new(factory()) as Instance),
        }
    }

    /// Create a value component: a descriptor whose instance is its
    /// own config map, as declared in a manifest.
    pub fn value(name: impl Into<String>, config: HashMap<String, serde_json::Value>) -> Self {
        let instance_config = config.clone();
        Self {
            name: name.into(),
            type_name: std::any::type_name::<serde_json::Value>(),
            config: Some(config),
            factory: Arc::new(move || {
                let object: serde_json::Map<String, serde_json::Value> =
                    instance_config.clone().into_iter().collect();
                Box::new(serde_json::Value::Object(object)) as Instance
            }),
        }
    }

    /// Attach a config map to a factory-based descriptor.
    pub fn with_config(mut self, config: HashMap<String, serde_json::Value>) -> Self {
        self.config = Some(config);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn config(&self) -> Option<&HashMap<String, serde_json::Value>> {
        self.config.as_ref()
    }

    /// Run the factory, producing a fresh instance.
    pub fn instantiate(&self) -> Instance {
        (self.factory)()
    }
}

impl std::fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("config", &self.config)
            .finish()
    }
}

/// One ordered import entry of a configuration source.
#[derive(Clone)]
pub enum Import {
    /// Import another catalog source by name.
    Source(String),
    /// Import the sources named by a selector at resolution time.
    Selector(Selector),
    /// Run a registrar against the registry at this point in the traversal.
    Registrar(Registrar),
}

impl std::fmt::Debug for Import {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Import::Source(name) => f.debug_tuple("Source").field(name).finish(),
            Import::Selector(_) => f.write_str("Selector(..)"),
            Import::Registrar(_) => f.write_str("Registrar(..)"),
        }
    }
}

/// A named group of component descriptors plus an ordered import list.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    pub name: String,
    pub descriptors: Vec<ComponentDescriptor>,
    pub imports: Vec<Import>,
}

impl ConfigSource {
    /// Create a SourceBuilder for a named source
    pub fn builder(name: impl Into<String>) -> SourceBuilder {
        SourceBuilder::new(name.into())
    }
}

/// Builder for constructing a ConfigSource
pub struct SourceBuilder {
    name: String,
    descriptors: Vec<ComponentDescriptor>,
    imports: Vec<Import>,
}

impl SourceBuilder {
    fn new(name: String) -> Self {
        Self {
            name,
            descriptors: Vec::new(),
            imports: Vec::new(),
        }
    }

    /// Declare a component with a factory closure.
    pub fn component<T, F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.descriptors.push(ComponentDescriptor::new(name, factory));
        self
    }

    /// Declare a pre-built descriptor.
    pub fn descriptor(mut self, descriptor: ComponentDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Import another source by name.
    pub fn import(mut self, source_name: impl Into<String>) -> Self {
        self.imports.push(Import::Source(source_name.into()));
        self
    }

    /// Import the sources named by a selector at resolution time.
    pub fn selector<F>(mut self, selector: F) -> Self
    where
        F: Fn(&SourceRef) -> Vec<String> + Send + Sync + 'static,
    {
        self.imports.push(Import::Selector(Arc::new(selector)));
        self
    }

    /// Run a registrar against the registry at this point in the import list.
    pub fn registrar<F>(mut self, registrar: F) -> Self
    where
        F: Fn(&SourceRef, &mut Registry) -> Result<(), ResolveError> + Send + Sync + 'static,
    {
        self.imports.push(Import::Registrar(Arc::new(registrar)));
        self
    }

    /// Build the ConfigSource
    pub fn build(self) -> ConfigSource {
        ConfigSource {
            name: self.name,
            descriptors: self.descriptors,
            imports: self.imports,
        }
    }
}

/// The named set of configuration sources available for resolution.
#[derive(Debug, Default)]
pub struct Catalog {
    sources: HashMap<String, ConfigSource>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source, failing on a name collision.
    pub fn add(&mut self, source: ConfigSource) -> Result<(), ResolveError> {
        if self.sources.contains_key(&source.name) {
            return Err(ResolveError::DuplicateSource {
                name: source.name.clone(),
            });
        }
        self.sources.insert(source.name.clone(), source);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ConfigSource> {
        self.sources.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
