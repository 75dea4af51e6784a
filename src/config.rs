// file: src/config.rs
// description: stage configuration with toml support and resolved run options
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use dotenvy::dotenv;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_OUTPUT_FILE: &str = "churn_prediction_results.csv";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub stages: StageConfig,
    pub input: InputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StageConfig {
    /// Program used to run both stage scripts.
    pub interpreter: String,
    pub mapper_script: PathBuf,
    pub pipeline_script: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Compared case-insensitively, without the leading dot.
    pub required_extension: String,
}

impl Config {
    /// Layers built-in defaults, an optional TOML file and `CHURN_CLI__*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = Self::default_config();
        let mut builder = config::Config::builder()
            .set_default("stages.interpreter", defaults.stages.interpreter)
            .and_then(|b| {
                b.set_default(
                    "stages.mapper_script",
                    defaults.stages.mapper_script.display().to_string(),
                )
            })
            .and_then(|b| {
                b.set_default(
                    "stages.pipeline_script",
                    defaults.stages.pipeline_script.display().to_string(),
                )
            })
            .and_then(|b| {
                b.set_default("input.required_extension", defaults.input.required_extension)
            })
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        if let Some(path) = path {
            if !path.exists() {
                return Err(PipelineError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("CHURN_CLI")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            stages: StageConfig {
                interpreter: "python3".to_string(),
                mapper_script: PathBuf::from("mapper.py"),
                pipeline_script: PathBuf::from("pipeline.py"),
            },
            input: InputConfig {
                required_extension: "csv".to_string(),
            },
        }
    }

    fn normalize(&mut self) {
        let trimmed = self.input.required_extension.trim().trim_start_matches('.');
        self.input.required_extension = trimmed.to_string();
        self.stages.interpreter = self.stages.interpreter.trim().to_string();
    }

    fn validate(&self) -> Result<()> {
        if self.stages.interpreter.is_empty() {
            return Err(PipelineError::Config(
                "stages.interpreter must not be empty".to_string(),
            ));
        }

        if self.stages.mapper_script.as_os_str().is_empty()
            || self.stages.pipeline_script.as_os_str().is_empty()
        {
            return Err(PipelineError::Config(
                "stage scripts must not be empty".to_string(),
            ));
        }

        if self.input.required_extension.is_empty() {
            return Err(PipelineError::Config(
                "input.required_extension must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
    Html,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Csv, OutputFormat::Json, OutputFormat::Html];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| {
                let supported: Vec<&str> = Self::ALL.iter().map(|f| f.as_str()).collect();
                format!(
                    "Unsupported format '{}'. Supported formats: {}",
                    s,
                    supported.join(", ")
                )
            })
    }
}

/// Settings resolved once from the command line; read-only afterwards.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub output: PathBuf,
    pub format: OutputFormat,
    pub verbose: bool,
    pub config: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            format: OutputFormat::default(),
            verbose: false,
            config: None,
        }
    }
}
