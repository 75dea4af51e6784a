// file: src/pipeline/orchestrator.rs
// description: validates inputs and sequences the mapping and prediction stages
// reference: orchestrates the two-stage churn prediction workflow

use crate::config::{Config, RunOptions};
use crate::error::{PipelineError, Result};
use crate::models::{CollectedFileSet, PipelineResult};
use crate::pipeline::progress::ProgressReporter;
use crate::pipeline::report;
use crate::pipeline::stage::{StageExecutor, StageInvocation, StageRunner};
use crate::utils::Validator;
use std::time::Instant;
use tracing::{debug, info};

const MAPPING_LABEL: &str = "Analyzing CSV structure...";
const PREDICTION_LABEL: &str = "Running machine learning pipeline...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    ValidatingInputs,
    RunningStage1,
    RunningStage2,
    Summarizing,
    Failed,
}

pub struct PipelineOrchestrator<E = StageRunner> {
    config: Config,
    options: RunOptions,
    executor: E,
    state: PipelineState,
    show_progress: bool,
}

impl PipelineOrchestrator<StageRunner> {
    pub fn new(config: Config, options: RunOptions) -> Self {
        Self::with_executor(config, options, StageRunner::new())
    }
}

impl<E: StageExecutor> PipelineOrchestrator<E> {
    pub fn with_executor(config: Config, options: RunOptions, executor: E) -> Self {
        Self {
            config,
            options,
            executor,
            state: PipelineState::ValidatingInputs,
            show_progress: true,
        }
    }

    /// Keeps spinners off the terminal; markers are still printed.
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Runs validation, mapping and prediction strictly in sequence.
    ///
    /// On any failure both progress indicators are stopped before the error
    /// is returned, whichever stage was actually running.
    pub async fn run(&mut self, files: &CollectedFileSet) -> Result<PipelineResult> {
        let started = Instant::now();
        let mut mapping = self.reporter(MAPPING_LABEL);
        let mut prediction = self.reporter(PREDICTION_LABEL);

        match self.execute(files, &mut mapping, &mut prediction).await {
            Ok(output) => {
                self.transition(PipelineState::Summarizing);
                let result = PipelineResult::new(output, started.elapsed());
                info!(
                    "Pipeline finished in {:.2}s, high-risk count: {}",
                    result.elapsed.as_secs_f64(),
                    result.high_risk
                );
                Ok(result)
            }
            Err(e) => {
                self.transition(PipelineState::Failed);
                mapping.stop(false);
                prediction.stop(false);
                Err(e)
            }
        }
    }

    async fn execute(
        &mut self,
        files: &CollectedFileSet,
        mapping: &mut ProgressReporter,
        prediction: &mut ProgressReporter,
    ) -> Result<String> {
        self.transition(PipelineState::ValidatingInputs);
        Validator::validate_all(files.iter(), &self.config.input.required_extension)?;

        self.transition(PipelineState::RunningStage1);
        mapping.start();
        let column_map = self.executor.execute(&self.mapper_invocation(files)).await?;
        mapping.stop(true);

        if self.options.verbose {
            println!("{}", report::column_mapping_line(&column_map));
        }

        self.transition(PipelineState::RunningStage2);
        prediction.start();
        let output = self
            .executor
            .execute(&self.pipeline_invocation(files, column_map))
            .await?;
        prediction.stop(true);

        Ok(output)
    }

    fn mapper_invocation(&self, files: &CollectedFileSet) -> StageInvocation {
        StageInvocation::new(
            self.config.stages.interpreter.clone(),
            self.config.stages.mapper_script.clone(),
            files.to_args(),
        )
    }

    /// The mapping text is forwarded untouched as the final argument.
    fn pipeline_invocation(&self, files: &CollectedFileSet, column_map: String) -> StageInvocation {
        let mut args = files.to_args();
        args.push(column_map.into());
        StageInvocation::new(
            self.config.stages.interpreter.clone(),
            self.config.stages.pipeline_script.clone(),
            args,
        )
    }

    fn reporter(&self, label: &str) -> ProgressReporter {
        if self.show_progress {
            ProgressReporter::new(label)
        } else {
            ProgressReporter::hidden(label)
        }
    }

    fn transition(&mut self, next: PipelineState) {
        debug!("Pipeline state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    pub fn print_summary(&self, result: &PipelineResult) {
        for line in report::summary_lines(result, &self.options) {
            println!("{}", line);
        }
    }

    pub fn print_failure(&self, error: &PipelineError) {
        for line in report::failure_lines(error, &self.config.stages.interpreter) {
            eprintln!("{}", line);
        }
    }
}
