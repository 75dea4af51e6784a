// file: src/error.rs
// description: Custom error types, failure classification and user hints
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("File must be a {} file: {}", .extension.to_uppercase(), .path.display())]
    WrongExtension { path: PathBuf, extension: String },

    #[error("File is empty: {}", .0.display())]
    EmptyFile(PathBuf),

    #[error("Cannot read file: {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Input closed before any file was provided")]
    InputClosed,

    #[error("Script {} exited with code {code}:\n{stderr}", .script.display())]
    StageFailed {
        script: PathBuf,
        code: i32,
        stderr: String,
    },

    #[error("Failed to launch {program} for {}: {source}", .script.display())]
    Spawn {
        program: String,
        script: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse failure taxonomy used to pick the recovery policy and the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Input,
    ExternalStage,
    Unexpected,
}

impl PipelineError {
    pub fn class(&self) -> ErrorClass {
        match self {
            PipelineError::FileNotFound(_)
            | PipelineError::WrongExtension { .. }
            | PipelineError::EmptyFile(_)
            | PipelineError::Unreadable { .. }
            | PipelineError::InputClosed => ErrorClass::Input,
            PipelineError::StageFailed { .. } => ErrorClass::ExternalStage,
            PipelineError::Spawn { .. } | PipelineError::Config(_) | PipelineError::Io(_) => {
                ErrorClass::Unexpected
            }
        }
    }

    pub fn is_input(&self) -> bool {
        self.class() == ErrorClass::Input
    }
}

pub const HINT_FILE_NOT_FOUND: &str = "Make sure the file path is correct and the file exists.";
pub const HINT_CSV_FORMAT: &str = "Make sure your file is a valid CSV with the required columns.";
pub const HINT_INTERPRETER: &str = "Make sure the stage interpreter is installed and accessible.";

/// Picks at most one hint by substring match on the rendered error text.
///
/// Best effort only: unmatched messages get no hint.
pub fn hint_for(message: &str, interpreter: &str) -> Option<&'static str> {
    if message.contains("File not found") {
        Some(HINT_FILE_NOT_FOUND)
    } else if message.contains("CSV") {
        Some(HINT_CSV_FORMAT)
    } else if !interpreter.is_empty() && message.contains(interpreter) {
        Some(HINT_INTERPRETER)
    } else {
        None
    }
}
