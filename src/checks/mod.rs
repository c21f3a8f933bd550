//! The check steps making up the structural contract, plus the runner that
//! drives them.
//!
//! Each step is an independent rule: it walks part of the tree and returns
//! its own errors and warnings. Steps never abort the run and never depend
//! on another step's outcome; new rules are added by appending another
//! [CheckStep] implementation to [default_steps].

pub mod runner;

mod asset_allowlist;
mod asset_contents;
mod chain_folders;
mod chain_logos;
mod dapps;
mod root_files;

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{stream, StreamExt};

pub use asset_allowlist::AssetAllowList;
pub use asset_contents::AssetContents;
pub use chain_folders::ChainFolders;
pub use chain_logos::ChainLogos;
pub use dapps::DappsFolder;
pub use root_files::RootFiles;
pub use runner::ValidationRunner;

use crate::config::ValidatorConfig;
use crate::image::LogoValidator;
use crate::repo::{FsProbe, ProbeError, RepoLayout};

/// Everything a step needs to run: the immutable configuration, the path
/// catalog, and the injected filesystem/logo capabilities.
pub struct CheckContext {
    pub config: ValidatorConfig,
    pub layout: RepoLayout,
    pub probe: Arc<dyn FsProbe>,
    pub logos: Arc<dyn LogoValidator>,
}

impl CheckContext {
    pub fn new(
        config: ValidatorConfig,
        layout: RepoLayout,
        probe: Arc<dyn FsProbe>,
        logos: Arc<dyn LogoValidator>,
    ) -> Self {
        CheckContext {
            config,
            layout,
            probe,
            logos,
        }
    }
}

/// Errors and warnings accumulated by one step. Errors fail the run;
/// warnings are advisory. Every finding string is self-contained, carrying
/// the offending path and chain/asset context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl StepReport {
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn merge(&mut self, other: StepReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// One independently runnable validation rule.
///
/// `run` returns `Err` only for a fault that leaves the whole step without a
/// result (for example the step's single directory listing failing); where a
/// step fans out over chains or assets, per-unit faults are captured as
/// error strings so sibling units still report.
#[async_trait]
pub trait CheckStep: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, ctx: &CheckContext) -> Result<StepReport, ProbeError>;
}

/// Fan out over `items` with at most `concurrency` futures in flight and
/// merge the per-item reports after collection. Completion order decides
/// merge order, so intra-step ordering is not deterministic; the report
/// layer normalizes before rendering.
pub(crate) async fn bounded_reports<T, F, Fut>(
    items: Vec<T>,
    concurrency: usize,
    run_one: F,
) -> StepReport
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = StepReport>,
{
    let mut merged = StepReport::default();
    let mut results = stream::iter(items.into_iter().map(run_one))
        .buffer_unordered(concurrency.max(1));
    while let Some(report) = results.next().await {
        merged.merge(report);
    }
    merged
}

/// The full rule table, in reporting order.
pub fn default_steps() -> Vec<Box<dyn CheckStep>> {
    vec![
        Box::new(RootFiles),
        Box::new(ChainFolders),
        Box::new(ChainLogos),
        Box::new(AssetContents),
        Box::new(AssetAllowList),
        Box::new(DappsFolder),
    ]
}
