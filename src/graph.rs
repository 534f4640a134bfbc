//! Import graph diagnostics: dry-run rendering and DOT export.

use anyhow::Result;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

use crate::types::{Catalog, ConfigSource, Import, SourceRef};

/// A node is a configuration source reachable from the root.
#[derive(Debug, Clone)]
pub struct SourceNode {
    pub name: String,
    pub components: usize,
    pub registrars: usize,
    pub root: bool,
}

/// An edge is one import relationship between two sources.
#[derive(Debug, Clone)]
pub enum Edge {
    /// Declared directly in the importing source.
    Declared,
    /// Produced by a selector at resolution time.
    Selected,
}

/// Graph of the sources reachable from a root, one edge per import.
pub struct ImportGraph {
    graph: DiGraph<SourceNode, Edge>,
    node_map: HashMap<String, NodeIndex>,
}

impl ImportGraph {
    /// Build the import graph for the sources reachable from `root`.
    ///
    /// Selectors are invoked to discover their targets. Imports naming
    /// undefined sources are reported as warnings and left out of the
    /// graph; circular imports fail.
    pub fn build(catalog: &Catalog, root: &str) -> Result<Self> {
        let root_source = catalog
            .get(root)
            .ok_or_else(|| anyhow::anyhow!("Unknown root source: '{root}'"))?;

        let mut graph = DiGraph::<SourceNode, Edge>::new();
        let mut node_map = HashMap::<String, NodeIndex>::new();

        add_source(catalog, root_source, true, &mut graph, &mut node_map);

        // Validate the graph for cycles
        if let Err(cycle) = petgraph::algo::toposort(&graph, None) {
            let node_name = &graph[cycle.node_id()].name;
            return Err(anyhow::anyhow!(
                "Circular import detected involving '{node_name}'"
            ));
        }

        Ok(Self { graph, node_map })
    }

    pub fn get_node_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }

    pub fn sources(&self) -> impl Iterator<Item = &SourceNode> {
        self.graph.raw_nodes().iter().map(|node| &node.weight)
    }

    /// Write the graph to a DOT file
    pub fn write_dot_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let dot_content = self.dot();
        std::fs::write(path, dot_content)
            .map_err(|e| anyhow::anyhow!("Failed to write DOT file: {e}"))?;
        Ok(())
    }

    fn dot(&self) -> String {
        let mut output = String::from("digraph ImportGraph {\n");
        output.push_str("  rankdir=LR;\n");
        output.push_str("  node [fontname=\"Arial\", fontsize=10];\n");
        output.push_str("  edge [fontname=\"Arial\", fontsize=9];\n");

        for node_index in self.graph.node_indices() {
            let node = &self.graph[node_index];
            let shape = if node.root { "doubleoctagon" } else { "box" };
            let color = if node.root { "lightgreen" } else { "lightblue" };
            let mut label = format!("{}\\n({} components", node.name, node.components);
            if node.registrars > 0 {
                label.push_str(&format!(", {} registrars", node.registrars));
            }
            label.push(')');
            output.push_str(&format!(
                "  {} [label=\"{label}\", shape={shape}, fillcolor={color}, style=\"rounded,filled\"];\n",
                node_index.index()
            ));
        }

        for edge_ref in self.graph.edge_references() {
            let edge_attrs = match edge_ref.weight() {
                Edge::Declared => "[color=blue, style=solid]",
                Edge::Selected => "[color=red, style=dashed, label=\"selected\"]",
            };
            output.push_str(&format!(
                "  {} -> {} {};\n",
                edge_ref.source().index(),
                edge_ref.target().index(),
                edge_attrs
            ));
        }

        output.push_str("}\n");
        output
    }
}

impl std::fmt::Debug for ImportGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug_struct = f.debug_struct("ImportGraph");

        let nodes: Vec<_> = self
            .graph
            .raw_nodes()
            .iter()
            .map(|node| &node.weight)
            .collect();
        debug_struct.field("sources", &nodes);

        let edges: Vec<String> = self
            .graph
            .edge_references()
            .map(|edge| {
                format!(
                    "{} -> {} ({:?})",
                    self.graph[edge.source()].name,
                    self.graph[edge.target()].name,
                    edge.weight()
                )
            })
            .collect();
        debug_struct.field("imports", &edges);
        debug_struct.finish()
    }
}

fn add_source(
    catalog: &Catalog,
    source: &ConfigSource,
    root: bool,
    graph: &mut DiGraph<SourceNode, Edge>,
    node_map: &mut HashMap<String, NodeIndex>,
) -> NodeIndex {
    if let Some(index) = node_map.get(&source.name) {
        return *index;
    }
    let registrars = source
        .imports
        .iter()
        .filter(|import| matches!(import, Import::Registrar(_)))
        .count();
    let index = graph.add_node(SourceNode {
        name: source.name.clone(),
        components: source.descriptors.len(),
        registrars,
        root,
    });
    node_map.insert(source.name.clone(), index);

    let origin = SourceRef {
        name: source.name.clone(),
    };
    for import in &source.imports {
        let targets: Vec<(String, Edge)> = match import {
            Import::Source(name) => vec![(name.clone(), Edge::Declared)],
            Import::Selector(selector) => selector(&origin)
                .into_iter()
                .map(|name| (name, Edge::Selected))
                .collect(),
            Import::Registrar(_) => Vec::new(),
        };
        for (target_name, edge) in targets {
            if let Some(target) = catalog.get(&target_name) {
                let target_index = add_source(catalog, target, false, graph, node_map);
                graph.update_edge(index, target_index, edge);
            } else {
                println!(
                    "Warning: Source '{}' imports '{}', which is not defined.",
                    source.name, target_name
                );
            }
        }
    }
    index
}
