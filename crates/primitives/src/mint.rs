//! nBTC mint transactions and the mapping from indexer statuses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of a mint as shown to the user.
///
/// `Minted` is reachable only from an explicit indexer signal, never from a confirmation count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MintStatus {
    /// Signed locally and handed to the wallet, not yet seen by the indexer.
    Broadcasting,
    Confirming,
    /// Deposit is final on Bitcoin and the Sui mint is in progress.
    Minting,
    Minted,
    Failed,
}

impl MintStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, MintStatus::Minted | MintStatus::Failed)
    }
}

impl fmt::Display for MintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MintStatus::Broadcasting => "broadcasting",
            MintStatus::Confirming => "confirming",
            MintStatus::Minting => "minting",
            MintStatus::Minted => "minted",
            MintStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Status as reported by the indexer.
///
/// Unknown values are kept verbatim in [`IndexerMintStatus::Other`] so nothing the indexer says
/// is lost.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IndexerMintStatus {
    Confirming,
    Finalized,
    Minted,
    Failed,
    Reorg,
    Other(String),
}

impl IndexerMintStatus {
    pub fn as_str(&self) -> &str {
        match self {
            IndexerMintStatus::Confirming => "confirming",
            IndexerMintStatus::Finalized => "finalized",
            IndexerMintStatus::Minted => "minted",
            IndexerMintStatus::Failed => "failed",
            IndexerMintStatus::Reorg => "reorg",
            IndexerMintStatus::Other(raw) => raw,
        }
    }

    /// Total mapping onto [`MintStatus`].
    ///
    /// A reorg is shown as a failure. Anything unrecognized maps to the non-terminal
    /// `Confirming` so that a new indexer status never hides a transaction or ends its
    /// polling.
    pub fn to_mint_status(&self) -> MintStatus {
        match self {
            IndexerMintStatus::Confirming | IndexerMintStatus::Other(_) => MintStatus::Confirming,
            IndexerMintStatus::Finalized => MintStatus::Minting,
            IndexerMintStatus::Minted => MintStatus::Minted,
            IndexerMintStatus::Failed | IndexerMintStatus::Reorg => MintStatus::Failed,
        }
    }
}

impl From<&str> for IndexerMintStatus {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "confirming" => IndexerMintStatus::Confirming,
            "finalized" => IndexerMintStatus::Finalized,
            "minted" => IndexerMintStatus::Minted,
            "failed" => IndexerMintStatus::Failed,
            "reorg" => IndexerMintStatus::Reorg,
            _ => IndexerMintStatus::Other(raw.to_owned()),
        }
    }
}

impl From<String> for IndexerMintStatus {
    fn from(raw: String) -> Self {
        IndexerMintStatus::from(raw.as_str())
    }
}

impl From<IndexerMintStatus> for String {
    fn from(status: IndexerMintStatus) -> Self {
        match status {
            IndexerMintStatus::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for IndexerMintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a raw indexer status string onto [`MintStatus`].
pub fn map_status(raw: &str) -> MintStatus {
    IndexerMintStatus::from(raw).to_mint_status()
}

/// A Bitcoin deposit that mints nBTC on Sui.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintTransaction {
    pub bitcoin_tx_id: String,
    pub amount_sats: u64,
    pub status: MintStatus,

    /// Raw indexer status; `None` for entries created locally.
    pub indexer_status: Option<IndexerMintStatus>,

    pub sui_address: String,
    pub sui_tx_id: Option<String>,

    /// Unix time in milliseconds.
    pub timestamp: u64,

    pub confirmations: u32,

    /// Unix time in milliseconds at which the user started the operation, when known.
    pub operation_start_date: Option<u64>,

    pub fees_sats: Option<u64>,
    pub bitcoin_explorer_url: Option<String>,
    pub sui_explorer_url: Option<String>,
    pub error_message: Option<String>,
}

impl MintTransaction {
    /// Optimistic entry for a transaction the user just signed.
    pub fn broadcasting(
        bitcoin_tx_id: impl Into<String>,
        amount_sats: u64,
        sui_address: impl Into<String>,
        now_ms: u64,
    ) -> Self {
        Self {
            bitcoin_tx_id: bitcoin_tx_id.into(),
            amount_sats,
            status: MintStatus::Broadcasting,
            indexer_status: None,
            sui_address: sui_address.into(),
            sui_tx_id: None,
            timestamp: now_ms,
            confirmations: 0,
            operation_start_date: Some(now_ms),
            fees_sats: None,
            bitcoin_explorer_url: None,
            sui_explorer_url: None,
            error_message: None,
        }
    }

    /// Key used to order transactions newest-first.
    pub fn sort_key(&self) -> u64 {
        self.operation_start_date.unwrap_or(self.timestamp)
    }

    pub fn is_optimistic(&self) -> bool {
        self.indexer_status.is_none()
    }
}
