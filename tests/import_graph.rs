mod common;

use wirebox::ConfigSource;
use wirebox::graph::ImportGraph;

#[test]
fn graph_contains_reachable_sources_only() {
    let root = ConfigSource::builder("app").import("animals").build();
    let unreachable = ConfigSource::builder("orphan").build();
    let catalog = common::catalog_of(vec![root, common::animals_source(), unreachable]);

    let graph = ImportGraph::build(&catalog, "app").unwrap();

    assert!(graph.get_node_index("app").is_some());
    assert!(graph.get_node_index("animals").is_some());
    assert!(graph.get_node_index("orphan").is_none());
}

#[test]
fn graph_counts_components_and_registrars() {
    let root = ConfigSource::builder("app")
        .component("one", || 1u32)
        .registrar(|_, _| Ok(()))
        .selector(|_| vec!["animals".to_string()])
        .build();
    let catalog = common::catalog_of(vec![root, common::animals_source()]);

    let graph = ImportGraph::build(&catalog, "app").unwrap();

    let app = graph
        .sources()
        .find(|node| node.name == "app")
        .expect("app node");
    assert_eq!(app.components, 1);
    assert_eq!(app.registrars, 1);
    assert!(app.root);

    let animals = graph
        .sources()
        .find(|node| node.name == "animals")
        .expect("animals node");
    assert_eq!(animals.components, 2);
    assert!(!animals.root);
}

#[test]
fn graph_exports_dot() {
    let root = ConfigSource::builder("app").import("animals").build();
    let catalog = common::catalog_of(vec![root, common::animals_source()]);
    let graph = ImportGraph::build(&catalog, "app").unwrap();

    let temp_dir = tempfile::tempdir().unwrap();
    let dot_path = temp_dir.path().join("graph.dot");
    graph.write_dot_file(&dot_path).unwrap();

    let dot = std::fs::read_to_string(&dot_path).unwrap();
    assert!(dot.starts_with("digraph ImportGraph {"));
    assert!(dot.contains("app"));
    assert!(dot.contains("animals"));
}
