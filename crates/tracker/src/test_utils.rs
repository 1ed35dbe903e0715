//! Fixtures and a scriptable indexer for tracker tests.

use std::{
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use byield_indexer::{IndexerClient, IndexerError, IndexerMintTransaction};
use byield_primitives::{
    BitcoinConfig, BitcoinNetwork, IndexerMintStatus, MintTransaction, NetworkConfigs, SuiAddress,
};

use crate::TrackTarget;

pub(crate) const OWNER: SuiAddress = SuiAddress::new([7; 32]);

pub(crate) fn target(network: BitcoinNetwork) -> TrackTarget {
    TrackTarget {
        network,
        sui_address: OWNER,
    }
}

/// Default configs with an indexer on mainnet only.
pub(crate) fn configs_with_indexer(url: &str) -> NetworkConfigs {
    let mut configs = NetworkConfigs::default();
    let mut mainnet = BitcoinConfig::defaults(BitcoinNetwork::Mainnet);
    mainnet.indexer_url = Some(url.to_owned());
    configs.set(mainnet);
    configs
}

pub(crate) fn pending(txid: &str, timestamp: u64) -> MintTransaction {
    MintTransaction::broadcasting(txid, 1_000, OWNER.to_string(), timestamp)
}

pub(crate) fn indexer_record(txid: &str, status: &str, timestamp: u64) -> IndexerMintTransaction {
    IndexerMintTransaction {
        bitcoin_tx_id: txid.to_owned(),
        amount_satoshi: 1_000,
        status: IndexerMintStatus::from(status.to_owned()),
        sui_recipient: OWNER.to_string(),
        sui_tx_id: None,
        timestamp,
        confirmations: 1,
        operation_start_date: None,
        fees: None,
        error_message: None,
    }
}

/// Indexer answering every list request with the same records after `delay`.
#[derive(Debug, Default)]
pub(crate) struct FakeIndexer {
    records: Mutex<Vec<IndexerMintTransaction>>,
    requests: Mutex<Vec<String>>,
    calls: AtomicUsize,
    completed: AtomicUsize,
    failing: AtomicBool,
    delay: Duration,
}

impl FakeIndexer {
    pub(crate) fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    pub(crate) fn set_records(&self, records: Vec<IndexerMintTransaction>) {
        *self.records.lock().unwrap() = records;
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Requests started, including those dropped before completion.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Recipients requested, in order.
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl IndexerClient for FakeIndexer {
    async fn mint_transactions(
        &self,
        _indexer_url: &str,
        sui_recipient: &str,
    ) -> Result<Vec<IndexerMintTransaction>, IndexerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(sui_recipient.to_owned());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(IndexerError::network("connection refused"));
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn mint_transaction(
        &self,
        _indexer_url: &str,
        bitcoin_tx_id: &str,
    ) -> Result<Option<IndexerMintTransaction>, IndexerError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.bitcoin_tx_id == bitcoin_tx_id)
            .cloned())
    }
}
