//! Aggregated run results: per-step findings tagged with the step name,
//! summary counts, and the ordering normalization applied before reporting.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Findings of a single step, tagged with the step name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub step: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub errors: usize,
    pub warnings: usize,
    /// True when no step produced an error; warnings do not fail a run.
    pub ok: bool,
}

/// Full result of one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub generated_at: String,
    pub steps: Vec<StepOutcome>,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn new(steps: Vec<StepOutcome>) -> Self {
        let errors = steps.iter().map(|s| s.errors.len()).sum();
        let warnings = steps.iter().map(|s| s.warnings.len()).sum();
        RunReport {
            generated_at: Utc::now().to_rfc3339(),
            steps,
            summary: RunSummary {
                errors,
                warnings,
                ok: errors == 0,
            },
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.summary.ok
    }

    /// Sort each step's findings lexicographically. Concurrent fan-out makes
    /// intra-step ordering non-deterministic across runs; normalizing before
    /// rendering keeps repeated runs comparable.
    pub fn normalize(&mut self) {
        for outcome in &mut self.steps {
            outcome.errors.sort();
            outcome.warnings.sort();
        }
    }

    /// Human-readable rendering: one line per finding, grouped by step, with
    /// a trailing summary line.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for outcome in &self.steps {
            if outcome.errors.is_empty() && outcome.warnings.is_empty() {
                continue;
            }
            out.push_str(&format!("[{}]\n", outcome.step));
            for error in &outcome.errors {
                out.push_str(&format!("  error: {error}\n"));
            }
            for warning in &outcome.warnings {
                out.push_str(&format!("  warning: {warning}\n"));
            }
        }
        out.push_str(&format!(
            "{}: {} error(s), {} warning(s)\n",
            if self.summary.ok { "passed" } else { "failed" },
            self.summary.errors,
            self.summary.warnings
        ));
        out
    }
}
