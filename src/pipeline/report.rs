// file: src/pipeline/report.rs
// description: console rendering of run summaries and classified failures
// reference: colored terminal output

use crate::config::RunOptions;
use crate::error::{ErrorClass, PipelineError, hint_for};
use crate::models::PipelineResult;
use crate::utils::logging::format_tip;
use colored::Colorize;

pub const UNEXPECTED_TIP: &str = "Use --verbose for more details or --help for usage information";

pub fn summary_lines(result: &PipelineResult, options: &RunOptions) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        "✅ Analysis Complete!".green().bold().to_string(),
        format!("📊 Found {} high-risk customers", result.high_risk)
            .green()
            .to_string(),
        format!("📁 Results saved to: {}", options.output.display())
            .blue()
            .to_string(),
        format!("⏱  Completed in {:.2}s", result.elapsed.as_secs_f64()),
    ];

    if options.verbose {
        lines.push(String::new());
        lines.push("Full output:".yellow().to_string());
        lines.push(result.raw_output.clone());
    }

    lines
}

/// Error banner plus at most one hint picked from the message text.
pub fn failure_lines(error: &PipelineError, interpreter: &str) -> Vec<String> {
    let message = error.to_string();
    let banner = match error.class() {
        ErrorClass::Unexpected => "❌ Unexpected Error:",
        ErrorClass::Input | ErrorClass::ExternalStage => "❌ Error:",
    };

    let mut lines = vec![
        String::new(),
        format!("{} {}", banner.red().bold(), message),
    ];

    if let Some(hint) = hint_for(&message, interpreter) {
        lines.push(format_tip(hint));
    } else if error.class() == ErrorClass::Unexpected {
        lines.push(format_tip(UNEXPECTED_TIP));
    }

    lines
}

pub fn unexpected_lines(message: &str) -> Vec<String> {
    vec![
        String::new(),
        format!("{} {}", "❌ Unexpected Error:".red().bold(), message),
        format_tip(UNEXPECTED_TIP),
    ]
}

/// Pretty-prints a JSON mapping for display; other text is shown verbatim.
pub fn column_mapping_line(raw: &str) -> String {
    let rendered = serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| raw.to_string());
    format!("{} {}", "Column mapping:".blue(), rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{HINT_CSV_FORMAT, HINT_FILE_NOT_FOUND, HINT_INTERPRETER};
    use std::path::PathBuf;
    use std::time::Duration;

    fn result(output: &str) -> PipelineResult {
        PipelineResult::new(output.to_string(), Duration::from_millis(1500))
    }

    #[test]
    fn test_summary_reports_count_and_destination() {
        let options = RunOptions {
            output: PathBuf::from("out/results.csv"),
            ..RunOptions::default()
        };
        let lines = summary_lines(&result("8 high-risk customers identified."), &options);
        let text = lines.join("\n");

        assert!(text.contains("Analysis Complete!"));
        assert!(text.contains("Found 8 high-risk customers"));
        assert!(text.contains("Results saved to: out/results.csv"));
        assert!(text.contains("1.50s"));
        assert!(!text.contains("Full output:"));
    }

    #[test]
    fn test_summary_unknown_count_and_verbose_output() {
        let options = RunOptions {
            verbose: true,
            ..RunOptions::default()
        };
        let lines = summary_lines(&result("model trained\nno summary"), &options);
        let text = lines.join("\n");

        assert!(text.contains("Found unknown high-risk customers"));
        assert!(text.contains("Full output:"));
        assert!(text.ends_with("model trained\nno summary"));
    }

    #[test]
    fn test_failure_hints() {
        let not_found = PipelineError::FileNotFound(PathBuf::from("a.csv"));
        let lines = failure_lines(&not_found, "python3");
        assert!(lines[1].contains("File not found: a.csv"));
        assert!(lines[2].contains(HINT_FILE_NOT_FOUND));

        let wrong = PipelineError::WrongExtension {
            path: PathBuf::from("a.txt"),
            extension: "csv".to_string(),
        };
        assert!(failure_lines(&wrong, "python3")[2].contains(HINT_CSV_FORMAT));

        let spawn = PipelineError::Spawn {
            program: "python3".to_string(),
            script: PathBuf::from("mapper.py"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let lines = failure_lines(&spawn, "python3");
        assert!(lines[1].contains("Unexpected Error:"));
        assert!(lines[2].contains(HINT_INTERPRETER));
    }

    #[test]
    fn test_failure_without_matching_hint() {
        let err = PipelineError::StageFailed {
            script: PathBuf::from("pipeline.py"),
            code: 1,
            stderr: "Traceback: boom".to_string(),
        };
        let lines = failure_lines(&err, "python3");
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("exited with code 1"));
    }

    #[test]
    fn test_unexpected_failure_gets_generic_tip() {
        let err = PipelineError::Config("bad value".to_string());
        let lines = failure_lines(&err, "python3");
        assert!(lines[1].contains("Unexpected Error:"));
        assert!(lines[2].contains(UNEXPECTED_TIP));
        assert_eq!(unexpected_lines("boom").len(), 3);
    }

    #[test]
    fn test_column_mapping_rendering() {
        let pretty = column_mapping_line("{\"id_column\":{\"column\":\"customer_id\",\"file_index\":0}}");
        assert!(pretty.contains("\"file_index\": 0"));

        let raw = column_mapping_line("not json");
        assert!(raw.ends_with("not json"));
    }
}
