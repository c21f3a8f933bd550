//! Rule: configured chain names are lowercase and chain folders contain
//! only allow-listed entries.

use async_trait::async_trait;

use super::{CheckContext, CheckStep, StepReport};
use crate::repo::ProbeError;

pub struct ChainFolders;

#[async_trait]
impl CheckStep for ChainFolders {
    fn name(&self) -> &'static str {
        "Chain folders are lowercase, contain only predefined list of files"
    }

    async fn run(&self, ctx: &CheckContext) -> Result<StepReport, ProbeError> {
        let mut report = StepReport::default();
        for chain in &ctx.config.chains {
            if *chain != chain.to_lowercase() {
                report.error(format!("Chain folder must be in lowercase \"{chain}\""));
            }
            let folder = ctx.layout.chain_folder(chain);
            // A configured chain with no folder on disk is surfaced by the
            // logo check; nothing to list here.
            if !ctx.probe.exists(&folder).await {
                continue;
            }
            match ctx.probe.list_dir(&folder).await {
                Ok(entries) => {
                    for entry in entries {
                        if !ctx.config.allow_lists.chain_folder.contains(&entry) {
                            report.error(format!(
                                "File '{entry}' not allowed in chain folder: {chain}"
                            ));
                        }
                    }
                }
                // One unreadable chain folder must not silence the others.
                Err(fault) => report.error(fault.to_string()),
            }
        }
        Ok(report)
    }
}
