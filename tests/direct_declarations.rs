mod common;

use common::{Cat, Dog};
use wirebox::{ConfigSource, resolve};

#[test]
fn declared_components_are_registered_in_order() {
    let source = ConfigSource::builder("app")
        .component("dog", || Dog)
        .component("cat", || Cat)
        .component("answer", || 42u32)
        .build();
    let catalog = common::catalog_of(vec![source]);

    let registry = resolve(&catalog, "app").unwrap();

    assert_eq!(common::names(&registry), ["dog", "cat", "answer"]);
    assert_eq!(registry.len(), 3);
}

#[test]
fn instantiate_runs_the_factory() {
    let catalog = common::catalog_of(vec![common::animals_source()]);
    let registry = resolve(&catalog, "animals").unwrap();

    let instance = registry.instantiate("dog").unwrap();
    assert_eq!(instance.downcast_ref::<Dog>(), Some(&Dog));

    // Each call produces a fresh instance.
    let again = registry.instantiate("dog").unwrap();
    assert!(again.downcast::<Dog>().is_ok());
}

#[test]
fn instantiate_unknown_component_fails() {
    let catalog = common::catalog_of(vec![common::animals_source()]);
    let registry = resolve(&catalog, "animals").unwrap();

    let err = registry.instantiate("bird").unwrap_err();
    assert!(matches!(
        err,
        wirebox::ResolveError::UnknownComponent { name } if name == "bird"
    ));
}

#[test]
fn unknown_root_source_fails() {
    let catalog = common::catalog_of(vec![common::animals_source()]);

    let err = resolve(&catalog, "missing").unwrap_err();
    assert!(matches!(
        err,
        wirebox::ResolveError::UnknownSource { name } if name == "missing"
    ));
}
