//! Repository layout: canonical paths and allow-lists for the asset tree.
//! The validated tree follows a fixed contract:
//! `blockchains/<chain>/info/logo.png`, `blockchains/<chain>/assets/<address>/{logo.png,info.json}`,
//! plus a flat `dapps/` image folder at the root.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const BLOCKCHAINS_DIR: &str = "blockchains";
pub const DAPPS_DIR: &str = "dapps";
pub const CHAIN_INFO_DIR: &str = "info";
pub const CHAIN_ASSETS_DIR: &str = "assets";
pub const LOGO_FILE: &str = "logo.png";
pub const INFO_FILE: &str = "info.json";

const ROOT_ALLOWED: &[&str] = &[
    ".git",
    ".github",
    ".gitignore",
    ".travis.yml",
    "Dangerfile",
    "Gemfile",
    "Gemfile.lock",
    "LICENSE",
    "README.md",
    "assetlint.yaml",
    "azure-pipelines.yml",
    "blockchains",
    "dapps",
    "jest.config.js",
    "media",
    "node_modules",
    "package-lock.json",
    "package.json",
    "pricing",
    "script",
    "script-old",
    "test",
];

const CHAIN_FOLDER_ALLOWED: &[&str] = &[
    "assets",
    "blacklist.json",
    "info",
    "validators",
    "whitelist.json",
];

const ASSET_FOLDER_ALLOWED: &[&str] = &["info.json", "logo.png"];

/// Filenames permitted in each directory kind. Anything present beyond the
/// listed names is a structural violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowLists {
    /// Entries permitted directly in the repository root.
    #[serde(default = "default_root_allowed")]
    pub root: BTreeSet<String>,
    /// Entries permitted directly inside a chain folder.
    #[serde(default = "default_chain_folder_allowed")]
    pub chain_folder: BTreeSet<String>,
    /// Entries permitted inside one asset's folder.
    #[serde(default = "default_asset_folder_allowed")]
    pub asset_folder: BTreeSet<String>,
}

impl Default for AllowLists {
    fn default() -> Self {
        AllowLists {
            root: default_root_allowed(),
            chain_folder: default_chain_folder_allowed(),
            asset_folder: default_asset_folder_allowed(),
        }
    }
}

fn default_root_allowed() -> BTreeSet<String> {
    ROOT_ALLOWED.iter().map(|name| name.to_string()).collect()
}

fn default_chain_folder_allowed() -> BTreeSet<String> {
    CHAIN_FOLDER_ALLOWED
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn default_asset_folder_allowed() -> BTreeSet<String> {
    ASSET_FOLDER_ALLOWED
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Canonical path construction for one checkout of the assets repository.
/// Pure joins; no filesystem access and no failure modes. Chain identifiers
/// are screened at config load with [is_clean_component]; asset addresses
/// come from directory listings and are single components by construction.
#[derive(Debug, Clone)]
pub struct RepoLayout {
    root: PathBuf,
}

impl RepoLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        RepoLayout { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/blockchains/<chain>`
    pub fn chain_folder(&self, chain: &str) -> PathBuf {
        self.root.join(BLOCKCHAINS_DIR).join(chain)
    }

    /// `<root>/blockchains/<chain>/info/logo.png`
    pub fn chain_logo(&self, chain: &str) -> PathBuf {
        self.chain_folder(chain).join(CHAIN_INFO_DIR).join(LOGO_FILE)
    }

    /// `<root>/blockchains/<chain>/assets`
    pub fn chain_assets(&self, chain: &str) -> PathBuf {
        self.chain_folder(chain).join(CHAIN_ASSETS_DIR)
    }

    /// `<root>/blockchains/<chain>/assets/<address>`
    pub fn asset_folder(&self, chain: &str, address: &str) -> PathBuf {
        self.chain_assets(chain).join(address)
    }

    /// `<root>/blockchains/<chain>/assets/<address>/logo.png`
    pub fn asset_logo(&self, chain: &str, address: &str) -> PathBuf {
        self.asset_folder(chain, address).join(LOGO_FILE)
    }

    /// `<root>/blockchains/<chain>/assets/<address>/info.json`
    pub fn asset_info(&self, chain: &str, address: &str) -> PathBuf {
        self.asset_folder(chain, address).join(INFO_FILE)
    }

    /// `<root>/dapps`
    pub fn dapps_folder(&self) -> PathBuf {
        self.root.join(DAPPS_DIR)
    }
}

/// True when `value` can be used as a single path component: non-empty, no
/// separators, no dot traversal.
pub fn is_clean_component(value: &str) -> bool {
    !value.is_empty()
        && value != "."
        && value != ".."
        && !value.contains('/')
        && !value.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_paths_follow_contract() {
        let layout = RepoLayout::new("/repo");
        assert_eq!(
            layout.chain_logo("ethereum"),
            PathBuf::from("/repo/blockchains/ethereum/info/logo.png")
        );
        assert_eq!(
            layout.chain_assets("ethereum"),
            PathBuf::from("/repo/blockchains/ethereum/assets")
        );
    }

    #[test]
    fn asset_paths_follow_contract() {
        let layout = RepoLayout::new("/repo");
        let address = "0xB8c77482e45F1F44dE1745F52C74426C631bDD52";
        assert_eq!(
            layout.asset_logo("smartchain", address),
            PathBuf::from(format!(
                "/repo/blockchains/smartchain/assets/{address}/logo.png"
            ))
        );
        assert_eq!(
            layout.asset_info("smartchain", address),
            PathBuf::from(format!(
                "/repo/blockchains/smartchain/assets/{address}/info.json"
            ))
        );
    }

    #[test]
    fn dapps_folder_is_fixed() {
        let layout = RepoLayout::new("/repo");
        assert_eq!(layout.dapps_folder(), PathBuf::from("/repo/dapps"));
    }

    #[test]
    fn default_allow_lists_cover_contract_names() {
        let allow = AllowLists::default();
        assert!(allow.root.contains("blockchains"));
        assert!(allow.root.contains("dapps"));
        assert!(allow.chain_folder.contains("assets"));
        assert!(allow.chain_folder.contains("info"));
        assert!(allow.asset_folder.contains("logo.png"));
        assert!(allow.asset_folder.contains("info.json"));
        assert!(!allow.asset_folder.contains("whitelist.json"));
    }

    #[test]
    fn clean_component_rejects_traversal() {
        assert!(is_clean_component("ethereum"));
        assert!(is_clean_component("0xB8c77482e45F1F44dE1745F52C74426C631bDD52"));
        assert!(!is_clean_component(""));
        assert!(!is_clean_component("."));
        assert!(!is_clean_component(".."));
        assert!(!is_clean_component("a/b"));
        assert!(!is_clean_component("a\\b"));
    }
}
