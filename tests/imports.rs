mod common;

use common::{Permission, Role};
use wirebox::{ConfigSource, ResolveError, resolve};

#[test]
fn imported_source_components_are_registered_after_own() {
    let root = ConfigSource::builder("app")
        .component("role", || Role {
            name: "user".to_string(),
        })
        .import("animals")
        .build();
    let catalog = common::catalog_of(vec![root, common::animals_source()]);

    let registry = resolve(&catalog, "app").unwrap();

    assert_eq!(common::names(&registry), ["role", "dog", "cat"]);
}

#[test]
fn imports_are_processed_in_declaration_order() {
    let root = ConfigSource::builder("app")
        .import("roles")
        .import("animals")
        .build();
    let catalog = common::catalog_of(vec![
        root,
        common::animals_source(),
        common::roles_source(),
    ]);

    let registry = resolve(&catalog, "app").unwrap();

    assert_eq!(common::names(&registry), ["role", "dog", "cat"]);
}

#[test]
fn diamond_imports_register_each_component_once() {
    let shared = ConfigSource::builder("shared")
        .component("permission", || Permission { id: 1 })
        .build();
    let left = ConfigSource::builder("left").import("shared").build();
    let right = ConfigSource::builder("right").import("shared").build();
    let root = ConfigSource::builder("app")
        .import("left")
        .import("right")
        .build();
    let catalog = common::catalog_of(vec![root, left, right, shared]);

    let registry = resolve(&catalog, "app").unwrap();

    assert_eq!(common::names(&registry), ["permission"]);
}

#[test]
fn undefined_import_fails() {
    let root = ConfigSource::builder("app").import("missing").build();
    let catalog = common::catalog_of(vec![root]);

    let err = resolve(&catalog, "app").unwrap_err();
    assert!(matches!(
        err,
        ResolveError::UnresolvedImport { source, name }
            if source == "app" && name == "missing"
    ));
}

#[test]
fn duplicate_source_names_are_rejected_by_the_catalog() {
    let mut catalog = wirebox::Catalog::new();
    catalog.add(common::animals_source()).unwrap();

    let err = catalog.add(common::animals_source()).unwrap_err();
    assert!(matches!(
        err,
        ResolveError::DuplicateSource { name } if name == "animals"
    ));
}
