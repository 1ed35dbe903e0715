//! Per-network static configuration.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Networks the bridge client can be pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BitcoinNetwork {
    Mainnet,
    Testnet,
    Regtest,
    /// Local development network; Bitcoin side runs regtest.
    Devnet,
}

impl BitcoinNetwork {
    pub const ALL: [BitcoinNetwork; 4] = [
        BitcoinNetwork::Mainnet,
        BitcoinNetwork::Testnet,
        BitcoinNetwork::Regtest,
        BitcoinNetwork::Devnet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BitcoinNetwork::Mainnet => "mainnet",
            BitcoinNetwork::Testnet => "testnet",
            BitcoinNetwork::Regtest => "regtest",
            BitcoinNetwork::Devnet => "devnet",
        }
    }

    fn index(&self) -> usize {
        match self {
            BitcoinNetwork::Mainnet => 0,
            BitcoinNetwork::Testnet => 1,
            BitcoinNetwork::Regtest => 2,
            BitcoinNetwork::Devnet => 3,
        }
    }
}

impl fmt::Display for BitcoinNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BitcoinNetwork {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BitcoinNetwork::ALL
            .into_iter()
            .find(|n| n.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown network '{s}'"))
    }
}

/// A setting the selected network does not provide.
///
/// Returned instead of silently degrading (e.g. to an empty transaction list) so callers have to
/// decide what an unconfigured network means for them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{network} has no {setting} configured")]
pub struct UnconfiguredNetwork {
    pub network: BitcoinNetwork,
    pub setting: &'static str,
}

/// Static configuration of one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitcoinConfig {
    pub network: BitcoinNetwork,

    /// Confirmations after which the bridge considers a deposit final.
    pub confirmation_depth: u32,

    /// Expected seconds between blocks.
    pub block_time_secs: u64,

    /// Flat fee in satoshis attached to mint transactions.
    pub fee_sats: u64,

    pub indexer_url: Option<String>,

    /// Mempool/esplora REST API base, e.g. `https://mempool.space/api`.
    pub mempool_url: Option<String>,

    /// Bridge address receiving mint deposits.
    pub deposit_address: Option<String>,

    pub bitcoin_explorer_url: Option<String>,
    pub sui_explorer_url: Option<String>,
}

impl BitcoinConfig {
    /// Built-in defaults. Indexer and deposit addresses are deployment specific and have no
    /// default.
    pub fn defaults(network: BitcoinNetwork) -> Self {
        let (confirmation_depth, block_time_secs, mempool, explorer, sui_explorer) = match network {
            BitcoinNetwork::Mainnet => (
                6,
                600,
                Some("https://mempool.space/api"),
                Some("https://mempool.space"),
                Some("https://suiscan.xyz/mainnet"),
            ),
            BitcoinNetwork::Testnet => (
                4,
                600,
                Some("https://mempool.space/testnet4/api"),
                Some("https://mempool.space/testnet4"),
                Some("https://suiscan.xyz/testnet"),
            ),
            BitcoinNetwork::Regtest | BitcoinNetwork::Devnet => {
                (1, 10, None, None, Some("https://suiscan.xyz/devnet"))
            }
        };

        Self {
            network,
            confirmation_depth,
            block_time_secs,
            fee_sats: 1_000,
            indexer_url: None,
            mempool_url: mempool.map(str::to_owned),
            deposit_address: None,
            bitcoin_explorer_url: explorer.map(str::to_owned),
            sui_explorer_url: sui_explorer.map(str::to_owned),
        }
    }

    pub fn indexer_url(&self) -> Result<&str, UnconfiguredNetwork> {
        self.require(self.indexer_url.as_deref(), "indexer url")
    }

    pub fn mempool_url(&self) -> Result<&str, UnconfiguredNetwork> {
        self.require(self.mempool_url.as_deref(), "mempool url")
    }

    pub fn deposit_address(&self) -> Result<&str, UnconfiguredNetwork> {
        self.require(self.deposit_address.as_deref(), "deposit address")
    }

    /// Explorer link for a Bitcoin transaction, if an explorer is configured.
    pub fn bitcoin_tx_url(&self, txid: &str) -> Option<String> {
        self.bitcoin_explorer_url
            .as_deref()
            .map(|base| format!("{}/tx/{txid}", base.trim_end_matches('/')))
    }

    /// Explorer link for a Sui transaction digest, if an explorer is configured.
    pub fn sui_tx_url(&self, digest: &str) -> Option<String> {
        self.sui_explorer_url
            .as_deref()
            .map(|base| format!("{}/tx/{digest}", base.trim_end_matches('/')))
    }

    /// Estimated seconds until a transaction with `confirmations` reaches the confirmation
    /// depth.
    pub fn remaining_confirmation_secs(&self, confirmations: u32) -> u64 {
        u64::from(self.confirmation_depth.saturating_sub(confirmations)) * self.block_time_secs
    }

    fn require<'a>(
        &self,
        value: Option<&'a str>,
        setting: &'static str,
    ) -> Result<&'a str, UnconfiguredNetwork> {
        value
            .filter(|v| !v.trim().is_empty())
            .ok_or(UnconfiguredNetwork {
                network: self.network,
                setting,
            })
    }
}

/// Lookup table holding the configuration of every [`BitcoinNetwork`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfigs {
    configs: [BitcoinConfig; 4],
}

impl NetworkConfigs {
    pub fn get(&self, network: BitcoinNetwork) -> &BitcoinConfig {
        &self.configs[network.index()]
    }

    /// Replaces the configuration of the network named by `config.network`.
    pub fn set(&mut self, config: BitcoinConfig) {
        let idx = config.network.index();
        self.configs[idx] = config;
    }

    pub fn iter(&self) -> impl Iterator<Item = &BitcoinConfig> {
        self.configs.iter()
    }
}

impl Default for NetworkConfigs {
    fn default() -> Self {
        Self {
            configs: BitcoinNetwork::ALL.map(BitcoinConfig::defaults),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_every_network() {
        let configs = NetworkConfigs::default();
        for network in BitcoinNetwork::ALL {
            assert_eq!(configs.get(network).network, network);
        }
        assert_eq!(configs.iter().count(), 4);
    }

    #[test]
    fn missing_indexer_is_typed() {
        let config = BitcoinConfig::defaults(BitcoinNetwork::Testnet);
        assert_eq!(
            config.indexer_url(),
            Err(UnconfiguredNetwork {
                network: BitcoinNetwork::Testnet,
                setting: "indexer url"
            })
        );
    }

    #[test]
    fn blank_values_count_as_unconfigured() {
        let mut config = BitcoinConfig::defaults(BitcoinNetwork::Regtest);
        config.deposit_address = Some("  ".to_owned());
        assert!(config.deposit_address().is_err());
        assert!(config.mempool_url().is_err());
    }

    #[test]
    fn set_replaces_single_network() {
        let mut configs = NetworkConfigs::default();
        let mut testnet = BitcoinConfig::defaults(BitcoinNetwork::Testnet);
        testnet.indexer_url = Some("https://indexer.example".to_owned());
        configs.set(testnet);

        assert_eq!(
            configs.get(BitcoinNetwork::Testnet).indexer_url(),
            Ok("https://indexer.example")
        );
        assert!(configs.get(BitcoinNetwork::Mainnet).indexer_url().is_err());
    }

    #[test]
    fn explorer_links() {
        let config = BitcoinConfig::defaults(BitcoinNetwork::Mainnet);
        assert_eq!(
            config.bitcoin_tx_url("abcd").as_deref(),
            Some("https://mempool.space/tx/abcd")
        );
        assert_eq!(
            config.sui_tx_url("Dg5t").as_deref(),
            Some("https://suiscan.xyz/mainnet/tx/Dg5t")
        );
        assert_eq!(
            BitcoinConfig::defaults(BitcoinNetwork::Regtest).bitcoin_tx_url("abcd"),
            None
        );
    }

    #[test]
    fn remaining_confirmation_time() {
        let config = BitcoinConfig::defaults(BitcoinNetwork::Mainnet);
        assert_eq!(config.remaining_confirmation_secs(0), 3_600);
        assert_eq!(config.remaining_confirmation_secs(5), 600);
        assert_eq!(config.remaining_confirmation_secs(9), 0);
    }

    #[test]
    fn network_from_str() {
        assert_eq!("Testnet".parse(), Ok(BitcoinNetwork::Testnet));
        assert!("signet".parse::<BitcoinNetwork>().is_err());
    }
}
