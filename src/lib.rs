// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod utils;

pub use config::{Config, DEFAULT_OUTPUT_FILE, InputConfig, OutputFormat, RunOptions, StageConfig};
pub use error::{ErrorClass, PipelineError, Result};
pub use models::{CollectedFileSet, PipelineResult, RiskCount};
pub use pipeline::{
    InteractiveCollector, PipelineOrchestrator, PipelineState, ProgressReporter, StageExecutor,
    StageInvocation, StageRunner,
};
pub use utils::Validator;

pub const APP_NAME: &str = "churn-prediction-cli";
pub const APP_DESCRIPTION: &str =
    "A professional CLI tool for customer churn prediction using machine learning";
