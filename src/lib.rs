//! Structural validation for a community-contributed blockchain asset
//! repository.
//!
//! The validated tree follows a fixed contract: per-chain folders under
//! `blockchains/`, per-asset subfolders with a logo and an `info.json`
//! descriptor, and a flat `dapps/` image folder. The crate walks the tree
//! with a set of independent check steps, each producing errors (which fail
//! the run) and warnings (advisory), fanning out over chains and assets with
//! bounded concurrency.

pub mod checks;
pub mod cli;
pub mod config;
pub mod image;
pub mod repo;
pub mod report;
