use loomcore::{GraphSpec, NodeKind, NodeSpec, ValidationError};
use loomruntime::compile;

fn spec(nodes: Vec<NodeSpec>, edges: &[(&str, &str)]) -> GraphSpec {
    let mut spec = GraphSpec::new();
    for node in nodes {
        spec.add_node(node);
    }
    for (source, target) in edges {
        spec.connect(*source, *target);
    }
    spec
}

#[test]
fn empty_graph_is_rejected() {
    assert_eq!(compile(&GraphSpec::new()), Err(ValidationError::EmptyGraph));
}

#[test]
fn empty_node_id_is_rejected() {
    let spec = spec(vec![NodeSpec::new("", "input")], &[]);
    assert_eq!(compile(&spec), Err(ValidationError::EmptyNodeId));
}

#[test]
fn duplicate_node_id_is_rejected() {
    let spec = spec(
        vec![NodeSpec::new("1", "input"), NodeSpec::new("1", "output")],
        &[],
    );
    assert_eq!(
        compile(&spec),
        Err(ValidationError::DuplicateNodeId("1".to_string()))
    );
}

#[test]
fn dangling_edge_is_rejected() {
    let spec = spec(
        vec![NodeSpec::new("1", "input"), NodeSpec::new("2", "output")],
        &[("1", "9")],
    );
    assert_eq!(
        compile(&spec),
        Err(ValidationError::UnknownNode("9".to_string()))
    );
}

#[test]
fn self_loop_is_rejected() {
    let spec = spec(
        vec![NodeSpec::new("1", "input"), NodeSpec::new("2", "model")],
        &[("1", "2"), ("2", "2")],
    );
    assert_eq!(
        compile(&spec),
        Err(ValidationError::SelfLoop("2".to_string()))
    );
}

#[test]
fn cycle_is_rejected() {
    let spec = spec(
        vec![
            NodeSpec::new("1", "input"),
            NodeSpec::new("2", "model"),
            NodeSpec::new("3", "model"),
        ],
        &[("1", "2"), ("2", "3"), ("3", "2")],
    );
    assert_eq!(compile(&spec), Err(ValidationError::Cycle));
}

#[test]
fn entry_point_prefers_first_input_node() {
    let spec = spec(
        vec![
            NodeSpec::new("a", "model"),
            NodeSpec::new("b", "input"),
            NodeSpec::new("c", "input"),
        ],
        &[],
    );
    let graph = compile(&spec).unwrap();
    assert_eq!(graph.entry(), "b");
}

#[test]
fn entry_point_falls_back_to_first_declared_node() {
    let spec = spec(
        vec![NodeSpec::new("a", "model"), NodeSpec::new("b", "output")],
        &[("a", "b")],
    );
    let graph = compile(&spec).unwrap();
    assert_eq!(graph.entry(), "a");
}

#[test]
fn adjacency_preserves_edge_declaration_order() {
    let spec = spec(
        vec![
            NodeSpec::new("a", "input"),
            NodeSpec::new("b", "output"),
            NodeSpec::new("c", "output"),
        ],
        &[("a", "c"), ("a", "b")],
    );
    let graph = compile(&spec).unwrap();
    assert_eq!(graph.successors("a"), ["c", "b"]);
    assert!(graph.successors("b").is_empty());
}

#[test]
fn compiling_twice_yields_identical_graphs() {
    let spec = spec(
        vec![
            NodeSpec::new("1", "input"),
            NodeSpec::new("2", "model").with_data("prompt", "Say hello to {input}"),
            NodeSpec::new("3", "output"),
        ],
        &[("1", "2"), ("2", "3")],
    );
    let first = compile(&spec).unwrap();
    let second = compile(&spec).unwrap();
    assert_eq!(first, second);
}

#[test]
fn node_kinds_are_resolved_at_compile_time() {
    let spec = spec(
        vec![
            NodeSpec::new("m", "model"),
            NodeSpec::new("t", "tool"),
            NodeSpec::new("u", "banana"),
        ],
        &[],
    );
    let graph = compile(&spec).unwrap();
    assert_eq!(
        graph.node("m").unwrap().kind,
        NodeKind::Model {
            prompt: NodeKind::DEFAULT_PROMPT.to_string()
        }
    );
    assert_eq!(
        graph.node("t").unwrap().kind,
        NodeKind::Tool {
            tool_name: NodeKind::DEFAULT_TOOL.to_string()
        }
    );
    assert_eq!(
        graph.node("u").unwrap().kind,
        NodeKind::Unknown {
            raw: "banana".to_string()
        }
    );
}
