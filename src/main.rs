// file: src/main.rs
// description: commandline application entry point with top-level error boundary
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use churn_cli::pipeline::report;
use churn_cli::utils::logging::{format_info, format_tip};
use churn_cli::{
    APP_DESCRIPTION, APP_NAME, CollectedFileSet, Config, DEFAULT_OUTPUT_FILE,
    InteractiveCollector, OutputFormat, PipelineOrchestrator, RunOptions,
};
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::BufReader;
use tracing::{debug, error};

const AFTER_HELP: &str = "\
EXAMPLES:
  churn-prediction-cli                                  # Interactive mode
  churn-prediction-cli data.csv                         # Single file
  churn-prediction-cli data1.csv data2.csv              # Multiple files
  churn-prediction-cli -o results.csv data.csv          # Custom output
  churn-prediction-cli -f json data.csv                 # JSON output

REQUIRED CSV COLUMNS:
  • Customer ID column (customer_id, id, etc.)
  • Login/session data (sessions, logins, etc.)
  • Support tickets (tickets, support, etc.)
  • Activity data (last_active, activity, etc.)
  • Financial data (total_spent, ltv, etc.)
  • Contract info (plan_type, contract, etc.)";

#[derive(Parser)]
#[command(name = "churn-prediction-cli")]
#[command(author = "cipher")]
#[command(version = "1.0.0")]
#[command(about = "A professional CLI tool for customer churn prediction using machine learning", long_about = None)]
#[command(disable_version_flag = true, after_help = AFTER_HELP)]
struct Cli {
    /// Input CSV files; omit to enter files interactively
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Output format: csv, json, html
    #[arg(short, long, value_name = "FORMAT", default_value = "csv")]
    format: OutputFormat,

    /// Show detailed debug information
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Use configuration file
    #[arg(long, value_name = "FILE", env = "CHURN_CLI_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    /// Print version
    #[allow(dead_code)]
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    churn_cli::utils::logging::init_logger(cli.color, cli.verbose);

    // Panics surface as a JoinError; progress reporters clear themselves on drop.
    match tokio::spawn(run(cli)).await {
        Ok(Ok(code)) => code,
        Ok(Err(e)) => {
            error!("Run aborted: {:#}", e);
            print_unexpected(&format!("{:#}", e));
            ExitCode::FAILURE
        }
        Err(e) => {
            print_unexpected(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let options = RunOptions {
        output: cli.output,
        format: cli.format,
        verbose: cli.verbose,
        config: cli.config,
    };

    let config = Config::load(options.config.as_deref()).context("Failed to load configuration")?;
    debug!(
        "Resolved options: output={}, format={}, interpreter={}",
        options.output.display(),
        options.format,
        config.stages.interpreter
    );

    print_banner();

    let files = if cli.files.is_empty() {
        println!("{}", format_info("Interactive mode - Add CSV files for analysis"));
        println!("{}\n", format_tip("Press Enter when you're done adding files"));

        let collector = InteractiveCollector::new(
            BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
            config.input.required_extension.clone(),
        );
        match collector.collect().await {
            Ok(files) => files,
            Err(e) => {
                for line in report::failure_lines(&e, &config.stages.interpreter) {
                    eprintln!("{}", line);
                }
                return Ok(ExitCode::FAILURE);
            }
        }
    } else {
        let message = format!(
            "Processing {} file(s) in non-interactive mode",
            cli.files.len()
        );
        println!("{}\n", format_info(&message));
        CollectedFileSet::new(cli.files).context("No files provided")?
    };

    println!("\n{}", "🚀 Starting churn prediction analysis...".blue());

    let mut orchestrator = PipelineOrchestrator::new(config, options);
    match orchestrator.run(&files).await {
        Ok(result) => {
            orchestrator.print_summary(&result);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            orchestrator.print_failure(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_banner() {
    println!(
        "{}",
        format!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"))
            .blue()
            .bold()
    );
    println!("{}\n", APP_DESCRIPTION.bold());
}

fn print_unexpected(message: &str) {
    for line in report::unexpected_lines(message) {
        eprintln!("{}", line);
    }
}
