use byield_primitives::{BitcoinConfig, IndexerMintStatus, MintTransaction};
use serde::{Deserialize, Serialize};

use crate::IndexerError;

/// A mint as reported by the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexerMintTransaction {
    pub bitcoin_tx_id: String,
    pub amount_satoshi: u64,
    pub status: IndexerMintStatus,
    pub sui_recipient: String,
    #[serde(default)]
    pub sui_tx_id: Option<String>,
    /// Unix time in milliseconds.
    pub timestamp: u64,
    #[serde(default)]
    pub confirmations: u32,
    #[serde(default)]
    pub operation_start_date: Option<u64>,
    #[serde(default)]
    pub fees: Option<u64>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl IndexerMintTransaction {
    /// Converts into the client model, deriving explorer links from `config`.
    pub fn into_mint_transaction(self, config: &BitcoinConfig) -> MintTransaction {
        let bitcoin_explorer_url = config.bitcoin_tx_url(&self.bitcoin_tx_id);
        let sui_explorer_url = self
            .sui_tx_id
            .as_deref()
            .and_then(|digest| config.sui_tx_url(digest));

        MintTransaction {
            status: self.status.to_mint_status(),
            indexer_status: Some(self.status),
            bitcoin_tx_id: self.bitcoin_tx_id,
            amount_sats: self.amount_satoshi,
            sui_address: self.sui_recipient,
            sui_tx_id: self.sui_tx_id,
            timestamp: self.timestamp,
            confirmations: self.confirmations,
            operation_start_date: self.operation_start_date,
            fees_sats: self.fees,
            bitcoin_explorer_url,
            sui_explorer_url,
            error_message: self.error_message,
        }
    }
}

/// The list endpoint answers either `{"transactions": [...]}` or a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum MintListResponse {
    Wrapped {
        transactions: Vec<IndexerMintTransaction>,
    },
    Bare(Vec<IndexerMintTransaction>),
}

pub fn decode_mint_transactions(body: &[u8]) -> Result<Vec<IndexerMintTransaction>, IndexerError> {
    let response: MintListResponse =
        serde_json::from_slice(body).map_err(|e| IndexerError::decode(e.to_string()))?;
    Ok(match response {
        MintListResponse::Wrapped { transactions } => transactions,
        MintListResponse::Bare(transactions) => transactions,
    })
}

pub fn decode_mint_transaction(body: &[u8]) -> Result<IndexerMintTransaction, IndexerError> {
    serde_json::from_slice(body).map_err(|e| IndexerError::decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use byield_primitives::{BitcoinNetwork, MintStatus};

    use super::*;

    const RECORD: &str = r#"{
        "bitcoin_tx_id": "ab01",
        "amount_satoshi": 50000,
        "status": "finalized",
        "sui_recipient": "0x1",
        "sui_tx_id": "Dg5t",
        "timestamp": 1700000000000,
        "confirmations": 7,
        "fees": 500
    }"#;

    #[test]
    fn decodes_both_list_shapes() {
        let wrapped = format!(r#"{{"transactions": [{RECORD}]}}"#);
        let bare = format!("[{RECORD}]");

        let a = decode_mint_transactions(wrapped.as_bytes()).unwrap();
        let b = decode_mint_transactions(bare.as_bytes()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].status, IndexerMintStatus::Finalized);
        assert_eq!(a[0].operation_start_date, None);
    }

    #[test]
    fn empty_list() {
        assert!(decode_mint_transactions(b"[]").unwrap().is_empty());
        assert!(decode_mint_transactions(br#"{"transactions": []}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn malformed_body_is_decode_error() {
        assert!(matches!(
            decode_mint_transactions(b"<html>"),
            Err(IndexerError::Decode(_))
        ));
        assert!(matches!(
            decode_mint_transactions(br#"{"items": []}"#),
            Err(IndexerError::Decode(_))
        ));
    }

    #[test]
    fn converts_to_client_model() {
        let record = decode_mint_transaction(RECORD.as_bytes()).unwrap();
        let config = BitcoinConfig::defaults(BitcoinNetwork::Mainnet);
        let tx = record.into_mint_transaction(&config);

        assert_eq!(tx.status, MintStatus::Minting);
        assert_eq!(tx.indexer_status, Some(IndexerMintStatus::Finalized));
        assert_eq!(tx.amount_sats, 50_000);
        assert_eq!(tx.confirmations, 7);
        assert_eq!(tx.fees_sats, Some(500));
        assert_eq!(tx.sort_key(), 1_700_000_000_000);
        assert_eq!(
            tx.bitcoin_explorer_url.as_deref(),
            Some("https://mempool.space/tx/ab01")
        );
        assert_eq!(
            tx.sui_explorer_url.as_deref(),
            Some("https://suiscan.xyz/mainnet/tx/Dg5t")
        );
    }

    #[test]
    fn reorg_keeps_raw_status() {
        let body = RECORD.replace("finalized", "reorg");
        let tx = decode_mint_transaction(body.as_bytes())
            .unwrap()
            .into_mint_transaction(&BitcoinConfig::defaults(BitcoinNetwork::Testnet));
        assert_eq!(tx.status, MintStatus::Failed);
        assert_eq!(tx.indexer_status, Some(IndexerMintStatus::Reorg));
    }
}
