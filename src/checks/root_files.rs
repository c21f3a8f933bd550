//! Rule: only allow-listed entries may sit in the repository root.

use async_trait::async_trait;

use super::{CheckContext, CheckStep, StepReport};
use crate::repo::ProbeError;

pub struct RootFiles;

#[async_trait]
impl CheckStep for RootFiles {
    fn name(&self) -> &'static str {
        "Repository root dir"
    }

    async fn run(&self, ctx: &CheckContext) -> Result<StepReport, ProbeError> {
        let mut report = StepReport::default();
        let entries = ctx.probe.list_dir(ctx.layout.root()).await?;
        for entry in entries {
            if !ctx.config.allow_lists.root.contains(&entry) {
                report.error(format!(
                    "File \"{entry}\" should not be in the repository root: {}",
                    ctx.layout.root().display()
                ));
            }
        }
        Ok(report)
    }
}
