use chrono::Utc;
use loomcore::{EventBus, ExecutionFault, ExecutionState, RunEvent, RunId};
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;

use crate::compiler::Graph;
use crate::handlers::NodeHandlers;

/// Walks a compiled graph from its entry point, one node at a time.
///
/// Traversal is depth-first with successors visited in edge-declaration
/// order, so `steps` accumulates in a stable, reproducible order. A node
/// reached through more than one edge executes only once per run.
pub struct GraphExecutor<'a> {
    handlers: &'a NodeHandlers,
}

impl<'a> GraphExecutor<'a> {
    pub fn new(handlers: &'a NodeHandlers) -> Self {
        Self { handlers }
    }

    pub async fn execute(
        &self,
        graph: &Graph,
        state: &mut ExecutionState,
        run_id: RunId,
        events: &EventBus,
        cancellation: &CancellationToken,
    ) -> Result<(), ExecutionFault> {
        let mut frontier = vec![graph.entry().to_string()];
        let mut visited: HashSet<String> = HashSet::new();

        while let Some(node_id) = frontier.pop() {
            if !visited.insert(node_id.clone()) {
                continue;
            }
            // Cancellation is honored only between handler invocations;
            // an in-flight adapter call runs to completion or hits its
            // own timeout.
            if cancellation.is_cancelled() {
                return Err(ExecutionFault::Cancelled);
            }

            let node = graph.node(&node_id).ok_or_else(|| ExecutionFault::Node {
                node_id: node_id.clone(),
                message: "node missing from compiled graph".to_string(),
            })?;

            events.emit(RunEvent::NodeStarted {
                run_id,
                node_id: node.id.clone(),
                kind: node.kind.name().to_string(),
                timestamp: Utc::now(),
            });

            let update = self.handlers.run(node, state).await?;
            state.apply(update);

            tracing::info!(run_id = %run_id, node_id = %node.id, "node completed");
            events.emit(RunEvent::NodeFinished {
                run_id,
                node_id: node.id.clone(),
                timestamp: Utc::now(),
            });

            // Reverse push keeps edge-declaration order on the stack.
            for successor in graph.successors(&node_id).iter().rev() {
                if !visited.contains(successor) {
                    frontier.push(successor.clone());
                }
            }
        }

        Ok(())
    }
}
