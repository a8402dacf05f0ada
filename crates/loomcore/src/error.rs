use thiserror::Error;

use crate::RunId;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Execution fault: {0}")]
    Execution(#[from] ExecutionFault),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Compile-time rejection of a malformed graph.
///
/// Reported for the first violation found; a graph that fails validation
/// is never partially constructed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Graph has no nodes")]
    EmptyGraph,

    #[error("Node id must not be empty")]
    EmptyNodeId,

    #[error("Duplicate node id: {0}")]
    DuplicateNodeId(String),

    #[error("Edge references unknown node: {0}")]
    UnknownNode(String),

    #[error("Self loop on node: {0}")]
    SelfLoop(String),

    #[error("Graph contains a cycle")]
    Cycle,
}

/// Unexpected fault raised out of node execution.
///
/// Adapter-reported errors are not faults: they flow through the state
/// as ordinary output strings and the run keeps going.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionFault {
    #[error("Node {node_id} failed: {message}")]
    Node { node_id: String, message: String },

    #[error("Run cancelled")]
    Cancelled,
}

/// Failure to persist a run status transition.
///
/// Never retried by the engine; the caller's supervisor decides on
/// retry and alerting policy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Run not found: {0}")]
    RunNotFound(RunId),

    #[error("Illegal status transition for run {0}")]
    IllegalTransition(RunId),

    #[error("Backend error: {0}")]
    Backend(String),
}
