#![allow(dead_code)]

use std::io::Write;
use std::ops::Deref;
use std::path::Path;
use tempfile::{Builder, NamedTempFile};
use wirebox::{Catalog, ConfigSource};

pub struct TestFile(NamedTempFile);

impl Deref for TestFile {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        self.0.path()
    }
}

pub fn create_toml_test_file(content: &str) -> TestFile {
    let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
    write!(temp_file, "{}", content).unwrap();
    TestFile(temp_file)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dog;

#[derive(Debug, Clone, PartialEq)]
pub struct Cat;

#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Permission {
    pub id: u64,
}

pub fn catalog_of(sources: Vec<ConfigSource>) -> Catalog {
    let mut catalog = Catalog::new();
    for source in sources {
        catalog.add(source).unwrap();
    }
    catalog
}

/// Source declaring the dog and cat components.
pub fn animals_source() -> ConfigSource {
    ConfigSource::builder("animals")
        .component("dog", || Dog)
        .component("cat", || Cat)
        .build()
}

/// Source declaring the role component.
pub fn roles_source() -> ConfigSource {
    ConfigSource::builder("roles")
        .component("role", || Role {
            name: "admin".to_string(),
        })
        .build()
}

pub fn names(registry: &wirebox::Registry) -> Vec<String> {
    registry.names().map(str::to_string).collect()
}
