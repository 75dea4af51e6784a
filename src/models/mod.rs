// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod file_set;
pub mod result;

pub use file_set::CollectedFileSet;
pub use result::{PipelineResult, RiskCount};
