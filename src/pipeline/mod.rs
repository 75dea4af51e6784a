// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod collector;
mod orchestrator;
mod progress;
pub mod report;
mod stage;

pub use collector::InteractiveCollector;
pub use orchestrator::{PipelineOrchestrator, PipelineState};
pub use progress::ProgressReporter;
pub use stage::{StageExecutor, StageInvocation, StageRunner};
