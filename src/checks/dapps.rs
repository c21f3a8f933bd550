//! Rule: the dapps image folder holds only `.png` files with all-lowercase
//! names. Extension and casing are independent violations; `Foo.PNG` earns
//! one error for each.

use async_trait::async_trait;

use super::{CheckContext, CheckStep, StepReport};
use crate::repo::ProbeError;

pub struct DappsFolder;

#[async_trait]
impl CheckStep for DappsFolder {
    fn name(&self) -> &'static str {
        "Dapps folders contain only .png files, with all lowercase names"
    }

    async fn run(&self, ctx: &CheckContext) -> Result<StepReport, ProbeError> {
        let mut report = StepReport::default();
        let dapps = ctx.layout.dapps_folder();
        if !ctx.probe.exists(&dapps).await {
            return Ok(report);
        }
        for filename in ctx.probe.list_dir(&dapps).await? {
            if !filename.ends_with(".png") {
                report.error(format!(
                    "File '{filename}' has invalid extension; {}",
                    dapps.display()
                ));
            }
            if filename.to_lowercase() != filename {
                report.error(format!(
                    "File '{filename}' is not all-lowercase; {}",
                    dapps.display()
                ));
            }
        }
        Ok(report)
    }
}
