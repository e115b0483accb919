//! Service layer: stage agents and the pipeline orchestrator.

pub mod agents;
pub mod pipeline;

pub use agents::{StageAgent, StageInputs};
pub use pipeline::{FailurePolicy, PipelineOrchestrator};
