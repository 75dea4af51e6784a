// file: src/models/result.rs
// description: pipeline outcome and high-risk count extraction from stage output
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::time::Duration;

lazy_static! {
    static ref HIGH_RISK_COUNT: Regex =
        Regex::new(r"([0-9]+) high-risk customers identified").expect("HIGH_RISK_COUNT regex is valid");
}

/// Number of high-risk customers reported by the prediction stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskCount {
    Known(u64),
    Unknown,
}

impl RiskCount {
    /// Scrapes the first "<N> high-risk customers identified" phrase.
    ///
    /// A missing phrase is not an error; it yields `Unknown`.
    pub fn extract(output: &str) -> Self {
        HIGH_RISK_COUNT
            .captures(output)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .map_or(RiskCount::Unknown, RiskCount::Known)
    }
}

impl fmt::Display for RiskCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskCount::Known(count) => write!(f, "{}", count),
            RiskCount::Unknown => f.write_str("unknown"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub high_risk: RiskCount,
    /// Trimmed stdout of the prediction stage.
    pub raw_output: String,
    pub elapsed: Duration,
}

impl PipelineResult {
    pub fn new(raw_output: String, elapsed: Duration) -> Self {
        Self {
            high_risk: RiskCount::extract(&raw_output),
            raw_output,
            elapsed,
        }
    }
}
