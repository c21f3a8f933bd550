//! Flat driver over the ordered step sequence. Every step runs to
//! completion regardless of prior failures; a step-level fault becomes one
//! error attributed to that step instead of aborting the run.

use tracing::debug;

use super::{default_steps, CheckContext, CheckStep};
use crate::report::{RunReport, StepOutcome};

pub struct ValidationRunner {
    steps: Vec<Box<dyn CheckStep>>,
}

impl ValidationRunner {
    pub fn new(steps: Vec<Box<dyn CheckStep>>) -> Self {
        ValidationRunner { steps }
    }

    pub fn with_default_steps() -> Self {
        ValidationRunner::new(default_steps())
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    pub async fn run(&self, ctx: &CheckContext) -> RunReport {
        let mut outcomes = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            debug!(step = step.name(), "running check step");
            let report = match step.run(ctx).await {
                Ok(report) => report,
                Err(fault) => {
                    let mut report = super::StepReport::default();
                    report.error(format!("check '{}' failed: {fault}", step.name()));
                    report
                }
            };
            debug!(
                step = step.name(),
                errors = report.errors.len(),
                warnings = report.warnings.len(),
                "check step complete"
            );
            outcomes.push(StepOutcome {
                step: step.name().to_string(),
                errors: report.errors,
                warnings: report.warnings,
            });
        }
        RunReport::new(outcomes)
    }
}
