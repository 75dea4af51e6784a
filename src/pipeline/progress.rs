// file: src/pipeline/progress.rs
// description: spinner-based progress reporting for a single pipeline stage
// reference: uses indicatif for the animated indicator

use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(100);
const SPINNER_TICKS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ";

pub struct ProgressReporter {
    label: String,
    bar: Option<ProgressBar>,
    visible: bool,
}

impl ProgressReporter {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            bar: None,
            visible: true,
        }
    }

    /// A reporter that keeps its state transitions but never draws.
    pub fn hidden(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            bar: None,
            visible: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.bar.is_some()
    }

    pub fn start(&mut self) {
        if self.bar.is_some() {
            return;
        }

        let bar = if self.visible {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
        };
        bar.set_style(spinner_style());
        bar.set_message(self.label.clone());
        bar.enable_steady_tick(TICK_INTERVAL);
        self.bar = Some(bar);
    }

    /// Ends the animation and prints the final marker.
    ///
    /// Safe to call on a reporter that never started: there is no timer to
    /// cancel, but the marker is still printed.
    pub fn stop(&mut self, success: bool) -> String {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }

        let line = self.marker(success);
        println!("{}", line);
        line
    }

    fn marker(&self, success: bool) -> String {
        let status = if success {
            "✓".green().to_string()
        } else {
            "✗".red().to_string()
        };
        format!("{} {}", status, self.label)
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg:.cyan}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(SPINNER_TICKS)
}
