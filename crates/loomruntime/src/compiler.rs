use loomcore::{GraphSpec, NodeKind, ValidationError};
use petgraph::algo::toposort;
use petgraph::graph::DiGraph;
use std::collections::HashMap;

/// A node with its behavior resolved, ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledNode {
    pub id: String,
    pub kind: NodeKind,
}

/// Compiled, immutable representation of a graph specification.
///
/// Holds the node table in declaration order, the adjacency map with
/// edge-declaration order preserved per source, and the entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    nodes: Vec<CompiledNode>,
    index: HashMap<String, usize>,
    adjacency: HashMap<String, Vec<String>>,
    entry: String,
}

impl Graph {
    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn node(&self, id: &str) -> Option<&CompiledNode> {
        self.index.get(id).map(|i| &self.nodes[*i])
    }

    pub fn successors(&self, id: &str) -> &[String] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Compile a raw node/edge description into an executable graph.
///
/// Fails with the first violation found and never returns a partially
/// constructed graph. The entry point is the first node declared with
/// type `input`, falling back to the first node in declaration order.
pub fn compile(spec: &GraphSpec) -> Result<Graph, ValidationError> {
    if spec.nodes.is_empty() {
        return Err(ValidationError::EmptyGraph);
    }

    let mut nodes = Vec::with_capacity(spec.nodes.len());
    let mut index = HashMap::new();
    for node in &spec.nodes {
        if node.id.is_empty() {
            return Err(ValidationError::EmptyNodeId);
        }
        if index.contains_key(&node.id) {
            return Err(ValidationError::DuplicateNodeId(node.id.clone()));
        }
        index.insert(node.id.clone(), nodes.len());
        nodes.push(CompiledNode {
            id: node.id.clone(),
            kind: NodeKind::resolve(&node.kind, &node.data),
        });
    }

    let mut adjacency: HashMap<String, Vec<String>> = HashMap::new();
    for edge in &spec.edges {
        if !index.contains_key(&edge.source) {
            return Err(ValidationError::UnknownNode(edge.source.clone()));
        }
        if !index.contains_key(&edge.target) {
            return Err(ValidationError::UnknownNode(edge.target.clone()));
        }
        if edge.source == edge.target {
            return Err(ValidationError::SelfLoop(edge.source.clone()));
        }
        adjacency
            .entry(edge.source.clone())
            .or_default()
            .push(edge.target.clone());
    }

    check_acyclic(nodes.len(), &index, spec)?;

    let entry = spec
        .nodes
        .iter()
        .find(|n| n.kind == "input")
        .unwrap_or(&spec.nodes[0])
        .id
        .clone();

    Ok(Graph {
        nodes,
        index,
        adjacency,
        entry,
    })
}

fn check_acyclic(
    node_count: usize,
    index: &HashMap<String, usize>,
    spec: &GraphSpec,
) -> Result<(), ValidationError> {
    let mut graph = DiGraph::<(), ()>::new();
    let petgraph_index: Vec<_> = (0..node_count).map(|_| graph.add_node(())).collect();
    for edge in &spec.edges {
        graph.add_edge(
            petgraph_index[index[&edge.source]],
            petgraph_index[index[&edge.target]],
            (),
        );
    }
    if toposort(&graph, None).is_err() {
        return Err(ValidationError::Cycle);
    }
    Ok(())
}
