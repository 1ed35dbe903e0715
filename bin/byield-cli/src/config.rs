use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use byield_indexer::DEFAULT_REQUEST_TIMEOUT;
use byield_primitives::{BitcoinConfig, BitcoinNetwork, NetworkConfigs};
use byield_sui_tx::ContractsConfig;
use byield_tracker::DEFAULT_POLL_INTERVAL;
use serde::Deserialize;

/// Logging configuration for the client.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub(crate) struct LoggingConfig {
    /// Service label to append to the service name (e.g., "prod", "dev").
    pub service_label: Option<String>,

    /// Directory path for file-based logging.
    pub log_dir: Option<PathBuf>,

    /// Prefix for log file names (defaults to "byield" if not set).
    pub log_file_prefix: Option<String>,

    /// Use JSON format for logs instead of compact format.
    pub json_format: Option<bool>,
}

/// Per-network settings layered over the built-in defaults.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub(crate) struct NetworkOverride {
    pub confirmation_depth: Option<u32>,
    pub block_time_secs: Option<u64>,
    pub fee_sats: Option<u64>,
    pub indexer_url: Option<String>,
    pub mempool_url: Option<String>,
    pub deposit_address: Option<String>,
    pub bitcoin_explorer_url: Option<String>,
    pub sui_explorer_url: Option<String>,
}

impl NetworkOverride {
    fn apply(&self, config: &mut BitcoinConfig) {
        if let Some(v) = self.confirmation_depth {
            config.confirmation_depth = v;
        }
        if let Some(v) = self.block_time_secs {
            config.block_time_secs = v;
        }
        if let Some(v) = self.fee_sats {
            config.fee_sats = v;
        }
        let strings = [
            (&self.indexer_url, &mut config.indexer_url),
            (&self.mempool_url, &mut config.mempool_url),
            (&self.deposit_address, &mut config.deposit_address),
            (&self.bitcoin_explorer_url, &mut config.bitcoin_explorer_url),
            (&self.sui_explorer_url, &mut config.sui_explorer_url),
        ];
        for (value, slot) in strings {
            if value.is_some() {
                slot.clone_from(value);
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub(crate) struct NetworksConfig {
    pub mainnet: NetworkOverride,
    pub testnet: NetworkOverride,
    pub regtest: NetworkOverride,
    pub devnet: NetworkOverride,
}

impl NetworksConfig {
    fn get(&self, network: BitcoinNetwork) -> &NetworkOverride {
        match network {
            BitcoinNetwork::Mainnet => &self.mainnet,
            BitcoinNetwork::Testnet => &self.testnet,
            BitcoinNetwork::Regtest => &self.regtest,
            BitcoinNetwork::Devnet => &self.devnet,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub(crate) struct Config {
    /// Sui full node JSON-RPC endpoint.
    pub sui_rpc_url: Option<String>,

    pub poll_interval_secs: Option<u64>,

    pub request_timeout_secs: Option<u64>,

    pub networks: NetworksConfig,

    pub contracts: ContractsConfig,

    pub logging: LoggingConfig,
}

impl Config {
    /// Reads `path`, or returns the built-in defaults when there is no config file.
    pub(crate) fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("config: failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("config: invalid {}", path.display()))
    }

    pub(crate) fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.poll_interval_secs == Some(0) {
            bail!("config: poll_interval_secs must be at least 1");
        }
        if self.request_timeout_secs == Some(0) {
            bail!("config: request_timeout_secs must be at least 1");
        }
        Ok(())
    }

    /// Built-in network defaults with this file's overrides applied.
    pub(crate) fn network_configs(&self) -> NetworkConfigs {
        let mut configs = NetworkConfigs::default();
        for network in BitcoinNetwork::ALL {
            let mut config = configs.get(network).clone();
            self.networks.get(network).apply(&mut config);
            configs.set(config);
        }
        configs
    }

    pub(crate) fn poll_interval(&self) -> Duration {
        self.poll_interval_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL)
    }

    pub(crate) fn request_timeout(&self) -> Duration {
        self.request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
    }

    pub(crate) fn sui_rpc_url(&self) -> anyhow::Result<&str> {
        self.sui_rpc_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .context("config: no sui_rpc_url configured")
    }
}
