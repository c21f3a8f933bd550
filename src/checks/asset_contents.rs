//! Rule: every discovered asset folder carries a logo and an `info.json`.
//!
//! A missing logo is an error. A missing info file is advisory by default;
//! chains named in `info_required_chains` escalate it to an error, and
//! chains named in `info_template_hint_chains` additionally log a skeleton
//! of the expected file at debug level.

use async_trait::async_trait;
use tracing::debug;

use super::{bounded_reports, CheckContext, CheckStep, StepReport};
use crate::repo::ProbeError;

pub struct AssetContents;

#[async_trait]
impl CheckStep for AssetContents {
    fn name(&self) -> &'static str {
        "Asset folders contain logo and info"
    }

    async fn run(&self, ctx: &CheckContext) -> Result<StepReport, ProbeError> {
        let chains = ctx.config.chains.clone();
        let cap = ctx.config.concurrency;
        let report = bounded_reports(chains, cap, |chain| async move {
            let mut report = StepReport::default();
            let assets_path = ctx.layout.chain_assets(&chain);
            if !ctx.probe.exists(&assets_path).await {
                return report;
            }
            let addresses = match ctx.probe.list_dir(&assets_path).await {
                Ok(addresses) => addresses,
                // One unreadable assets directory must not silence the
                // sibling chains.
                Err(fault) => {
                    report.error(fault.to_string());
                    return report;
                }
            };
            let chain = chain.as_str();
            let assets_report = bounded_reports(addresses, cap, |address| async move {
                check_asset(ctx, chain, &address).await
            })
            .await;
            report.merge(assets_report);
            report
        })
        .await;
        Ok(report)
    }
}

async fn check_asset(ctx: &CheckContext, chain: &str, address: &str) -> StepReport {
    let mut report = StepReport::default();

    let logo = ctx.layout.asset_logo(chain, address);
    if !ctx.probe.exists(&logo).await {
        report.error(format!(
            "Missing logo file for asset '{chain}/{address}' -- {}",
            logo.display()
        ));
    }

    let info = ctx.layout.asset_info(chain, address);
    if !ctx.probe.exists(&info).await {
        let message = format!(
            "Missing info file for asset '{chain}/{address}' -- {}",
            info.display()
        );
        if ctx.config.info_required_chains.contains(chain) {
            report.error(message);
        } else {
            if ctx.config.info_template_hint_chains.contains(chain) {
                debug!(
                    chain,
                    address,
                    template = %info_template(chain, address),
                    "info.json skeleton for missing file"
                );
            }
            report.warning(message);
        }
    }

    report
}

/// Skeleton of the expected `info.json`, rendered for the debug hint.
fn info_template(chain: &str, address: &str) -> String {
    let template = serde_json::json!({
        "name": "",
        "type": chain,
        "symbol": "",
        "decimals": 0,
        "website": "",
        "description": "-",
        "explorer": "",
        "status": "active",
        "id": address,
    });
    serde_json::to_string_pretty(&template).unwrap_or_default()
}
