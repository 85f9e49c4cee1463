//! Run report aggregation and printing

use serde::{Deserialize, Serialize};

use crate::runner::{CaseOutcome, CaseResult};

/// Aggregate of one runner invocation.
///
/// Built incrementally as cases are processed, finalized once traversal
/// completes, printed, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// Total number of cases
    pub total: usize,
    /// Number of passed cases
    pub passed: usize,
    /// Pass rate as a percentage
    pub pass_rate: f64,
    /// Failing case identifiers, in run order
    pub failures: Vec<String>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one case. Errored cases count as failures.
    pub fn record(&mut self, result: &CaseResult) {
        self.total += 1;
        match result.outcome {
            CaseOutcome::Pass => self.passed += 1,
            CaseOutcome::Fail | CaseOutcome::Error => {
                self.failures.push(result.path.display().to_string());
            }
        }
    }

    /// Compute the pass rate. A run with zero cases reports 0.00 instead of
    /// dividing by zero.
    pub fn finalize(&mut self) {
        self.pass_rate = if self.total > 0 {
            (self.passed as f64 / self.total as f64) * 100.0
        } else {
            0.0
        };
    }

    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Print the summary line and the failure list (omitted when empty).
    pub fn print_summary(&self) {
        println!(
            "=== Total: {} Passed: {} Pass Rate: {:.2}%",
            self.total, self.passed, self.pass_rate
        );
        if !self.failures.is_empty() {
            println!("--- Failed:");
            for failure in &self.failures {
                println!("--- {}", failure);
            }
        }
    }

    /// Export to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
