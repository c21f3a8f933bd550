//! Run configuration: the chain enumeration, allow-lists, logo policy, and
//! concurrency knobs. Built once at startup and passed into the check
//! context; the chain list is fixed configuration, never discovered from
//! disk.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::image::LogoPolicy;
use crate::repo::layout::{is_clean_component, AllowLists};

pub const DEFAULT_CONCURRENCY: usize = 16;
pub const DEFAULT_LOGO_PROBE_TIMEOUT_MS: u64 = 30_000;

/// Name of the config file looked up in the repository root when no
/// explicit `--config` path is given.
pub const CONFIG_FILE_NAME: &str = "assetlint.yaml";

const DEFAULT_CHAINS: &[&str] = &[
    "algorand",
    "binance",
    "bitcoin",
    "bitcoincash",
    "callisto",
    "cardano",
    "classic",
    "cosmos",
    "doge",
    "ethereum",
    "fantom",
    "gochain",
    "kava",
    "litecoin",
    "near",
    "ontology",
    "polkadot",
    "polygon",
    "smartchain",
    "solana",
    "stellar",
    "tezos",
    "theta",
    "thundertoken",
    "tron",
    "vechain",
    "wanchain",
    "zilliqa",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse config '{path}': {reason}")]
    Parse { path: String, reason: String },
    #[error("config lists no chains")]
    EmptyChains,
    #[error("chain identifier '{0}' is not a safe path component")]
    UnsafeChainId(String),
    #[error("concurrency must be at least 1")]
    ZeroConcurrency,
}

/// Immutable configuration for one validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// The fixed chain enumeration; every chain folder is expected under
    /// `blockchains/`.
    #[serde(default = "default_chains")]
    pub chains: Vec<String>,
    #[serde(default)]
    pub allow_lists: AllowLists,
    #[serde(default)]
    pub logo_policy: LogoPolicy,
    /// Cap on in-flight probe/validation operations per fan-out level.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Budget per logo-validation call in milliseconds; `null` disables the
    /// timeout.
    #[serde(default = "default_logo_probe_timeout_ms")]
    pub logo_probe_timeout_ms: Option<u64>,
    /// Chains whose missing `info.json` is an error instead of a warning.
    #[serde(default)]
    pub info_required_chains: BTreeSet<String>,
    /// Chains that get a debug-level `info.json` skeleton hint when the file
    /// is missing.
    #[serde(default)]
    pub info_template_hint_chains: BTreeSet<String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            chains: default_chains(),
            allow_lists: AllowLists::default(),
            logo_policy: LogoPolicy::default(),
            concurrency: DEFAULT_CONCURRENCY,
            logo_probe_timeout_ms: Some(DEFAULT_LOGO_PROBE_TIMEOUT_MS),
            info_required_chains: BTreeSet::new(),
            info_template_hint_chains: BTreeSet::new(),
        }
    }
}

fn default_chains() -> Vec<String> {
    DEFAULT_CHAINS.iter().map(|chain| chain.to_string()).collect()
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_logo_probe_timeout_ms() -> Option<u64> {
    Some(DEFAULT_LOGO_PROBE_TIMEOUT_MS)
}

impl ValidatorConfig {
    /// Load from a YAML or JSON file (picked by extension) and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let config: ValidatorConfig = if is_json {
            serde_json::from_str(&raw).map_err(|err| ConfigError::Parse {
                path: path.display().to_string(),
                reason: err.to_string(),
            })?
        } else {
            serde_yaml::from_str(&raw).map_err(|err| ConfigError::Parse {
                path: path.display().to_string(),
                reason: err.to_string(),
            })?
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the checks cannot run against: an empty chain
    /// list, chain identifiers that would escape the repository when joined
    /// into a path, and a zero concurrency cap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chains.is_empty() {
            return Err(ConfigError::EmptyChains);
        }
        for chain in &self.chains {
            if !is_clean_component(chain) {
                return Err(ConfigError::UnsafeChainId(chain.clone()));
            }
        }
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ValidatorConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.chains.contains(&"ethereum".to_string()));
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
    }

    #[test]
    fn empty_chain_list_is_rejected() {
        let config = ValidatorConfig {
            chains: Vec::new(),
            ..ValidatorConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyChains)));
    }

    #[test]
    fn traversal_chain_id_is_rejected() {
        let config = ValidatorConfig {
            chains: vec!["ethereum".to_string(), "../escape".to_string()],
            ..ValidatorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsafeChainId(chain)) if chain == "../escape"
        ));
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let config = ValidatorConfig {
            concurrency: 0,
            ..ValidatorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroConcurrency)
        ));
    }

    #[test]
    fn yaml_config_parses_with_defaults() {
        let config: ValidatorConfig =
            serde_yaml::from_str("chains: [foochain, barchain]\nconcurrency: 4\n")
                .expect("yaml should parse");
        assert_eq!(config.chains, vec!["foochain", "barchain"]);
        assert_eq!(config.concurrency, 4);
        assert!(config.allow_lists.root.contains("blockchains"));
        assert_eq!(
            config.logo_probe_timeout_ms,
            Some(DEFAULT_LOGO_PROBE_TIMEOUT_MS)
        );
    }

    #[test]
    fn timeout_can_be_disabled() {
        let config: ValidatorConfig =
            serde_yaml::from_str("chains: [foochain]\nlogo_probe_timeout_ms: null\n")
                .expect("yaml should parse");
        assert_eq!(config.logo_probe_timeout_ms, None);
    }
}
