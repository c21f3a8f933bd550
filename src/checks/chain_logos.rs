//! Rule: every configured chain has a logo that passes image validation.

use std::time::Duration;

use async_trait::async_trait;

use super::{bounded_reports, CheckContext, CheckStep, StepReport};
use crate::repo::ProbeError;

pub struct ChainLogos;

#[async_trait]
impl CheckStep for ChainLogos {
    fn name(&self) -> &'static str {
        "Chain folders have logo, and correct size"
    }

    async fn run(&self, ctx: &CheckContext) -> Result<StepReport, ProbeError> {
        let chains = ctx.config.chains.clone();
        let report = bounded_reports(chains, ctx.config.concurrency, |chain| async move {
            let mut report = StepReport::default();
            let logo = ctx.layout.chain_logo(&chain);
            if !ctx.probe.exists(&logo).await {
                report.error(format!(
                    "Missing logo file for chain '{chain}' at path \"{}\"",
                    logo.display()
                ));
                return report;
            }
            let verdict = match ctx.config.logo_probe_timeout_ms {
                Some(budget_ms) => {
                    let budget = Duration::from_millis(budget_ms);
                    match tokio::time::timeout(budget, ctx.logos.validate(&logo)).await {
                        Ok(verdict) => verdict,
                        Err(_) => Err(format!(
                            "Logo validation timed out after {budget_ms} ms: {}",
                            logo.display()
                        )),
                    }
                }
                None => ctx.logos.validate(&logo).await,
            };
            if let Err(reason) = verdict {
                report.error(reason);
            }
            report
        })
        .await;
        Ok(report)
    }
}
