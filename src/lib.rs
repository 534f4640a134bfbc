//! Wirebox
//!
//! A configuration-import registry for named components that supports
//! declared imports, resolution-time selectors, and direct registrars.

pub use loader::load_manifests;
pub use registry::{Registry, ResolveError};
pub use resolver::resolve;
pub use types::{Catalog, ComponentDescriptor, ConfigSource, Import, Instance, SourceRef};

pub mod graph;
pub mod loader;
pub mod registry;
pub mod resolver;
pub mod types;
