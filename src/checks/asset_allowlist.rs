//! Rule: asset folders contain only allow-listed entries.

use async_trait::async_trait;

use super::{CheckContext, CheckStep, StepReport};
use crate::repo::ProbeError;

pub struct AssetAllowList;

#[async_trait]
impl CheckStep for AssetAllowList {
    fn name(&self) -> &'static str {
        "Asset folders contain only predefined set of files"
    }

    async fn run(&self, ctx: &CheckContext) -> Result<StepReport, ProbeError> {
        let mut report = StepReport::default();
        for chain in &ctx.config.chains {
            let assets_path = ctx.layout.chain_assets(chain);
            if !ctx.probe.exists(&assets_path).await {
                continue;
            }
            let addresses = match ctx.probe.list_dir(&assets_path).await {
                Ok(addresses) => addresses,
                Err(fault) => {
                    report.error(fault.to_string());
                    continue;
                }
            };
            for address in addresses {
                let asset_folder = ctx.layout.asset_folder(chain, &address);
                match ctx.probe.list_dir(&asset_folder).await {
                    Ok(entries) => {
                        for entry in entries {
                            if !ctx.config.allow_lists.asset_folder.contains(&entry) {
                                report.error(format!(
                                    "File '{entry}' not allowed in asset folder: {}",
                                    asset_folder.display()
                                ));
                            }
                        }
                    }
                    Err(fault) => report.error(fault.to_string()),
                }
            }
        }
        Ok(report)
    }
}
