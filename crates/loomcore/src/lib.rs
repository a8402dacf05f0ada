//! Core abstractions for the workflow engine
//!
//! This crate provides the fundamental types and traits that the runtime
//! and adapters depend on: the graph wire format, execution state and its
//! merge policy, run records, the error taxonomy, the notification bus,
//! and the narrow ports to external services. No engine logic or I/O
//! lives here.

mod adapter;
mod error;
mod events;
mod graph;
mod run;
mod state;
mod store;

pub use adapter::{LanguageModel, ToolDispatcher};
pub use error::{EngineError, ExecutionFault, StoreError, ValidationError};
pub use events::{EventBus, RunEvent};
pub use graph::{EdgeSpec, GraphSpec, NodeKind, NodeSpec};
pub use run::{Run, RunId, RunStatus};
pub use state::{ExecutionState, RunInput, RunOutcome, StateUpdate};
pub use store::{MetricsSink, RunStore};

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
