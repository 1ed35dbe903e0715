use std::{cmp::Reverse, collections::HashSet};

use byield_indexer::{IndexerError, IndexerMintTransaction};
use byield_primitives::{
    BitcoinNetwork, MintTransaction, NetworkConfigs, SuiAddress, UnconfiguredNetwork,
};

/// Address and network whose mints are tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackTarget {
    pub network: BitcoinNetwork,
    pub sui_address: SuiAddress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerPhase {
    /// No target.
    Idle,
    /// Target set, first fetch not yet finished.
    Loading,
    /// At least one fetch finished, successfully or not.
    Ready,
    /// The target network has no indexer; nothing is fetched.
    Unconfigured(UnconfiguredNetwork),
}

/// Snapshot published to observers after every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerView {
    pub target: Option<TrackTarget>,
    pub phase: TrackerPhase,
    /// Newest first.
    pub transactions: Vec<MintTransaction>,
    /// Error of the latest fetch, cleared by the next successful one.
    pub last_error: Option<String>,
    pub refreshing: bool,
}

impl Default for TrackerView {
    fn default() -> Self {
        Self {
            target: None,
            phase: TrackerPhase::Idle,
            transactions: Vec::new(),
            last_error: None,
            refreshing: false,
        }
    }
}

/// Merges locally created entries with indexer entries.
///
/// Entries are keyed by Bitcoin txid. An indexer entry replaces a local entry with the same id
/// as a whole. The result is ordered newest first by [`MintTransaction::sort_key`].
pub fn merge_transactions(
    pending: &[MintTransaction],
    indexed: &[MintTransaction],
) -> Vec<MintTransaction> {
    let mut seen = HashSet::new();
    let mut merged: Vec<MintTransaction> = indexed
        .iter()
        .filter(|tx| seen.insert(tx.bitcoin_tx_id.as_str()))
        .cloned()
        .collect();
    merged.extend(
        pending
            .iter()
            .filter(|tx| seen.insert(tx.bitcoin_tx_id.as_str()))
            .cloned(),
    );
    merged.sort_by_key(|tx| Reverse(tx.sort_key()));
    merged
}

/// Data owned by the tracker task.
#[derive(Debug, Clone)]
pub struct TrackerState {
    configs: NetworkConfigs,
    target: Option<TrackTarget>,
    pending: Vec<MintTransaction>,
    indexed: Vec<MintTransaction>,
    last_error: Option<String>,
    phase: TrackerPhase,
    refreshing: bool,
}

impl TrackerState {
    pub fn new(configs: NetworkConfigs) -> Self {
        Self {
            configs,
            target: None,
            pending: Vec::new(),
            indexed: Vec::new(),
            last_error: None,
            phase: TrackerPhase::Idle,
            refreshing: false,
        }
    }

    pub fn target(&self) -> Option<&TrackTarget> {
        self.target.as_ref()
    }

    pub fn phase(&self) -> &TrackerPhase {
        &self.phase
    }

    /// Switches to `target`, discarding everything known about the previous one.
    pub fn set_target(&mut self, target: TrackTarget) {
        self.clear();
        self.phase = match self.configs.get(target.network).indexer_url() {
            Ok(_) => TrackerPhase::Loading,
            Err(err) => TrackerPhase::Unconfigured(err),
        };
        self.target = Some(target);
    }

    pub fn clear(&mut self) {
        self.target = None;
        self.pending.clear();
        self.indexed.clear();
        self.last_error = None;
        self.phase = TrackerPhase::Idle;
        self.refreshing = false;
    }

    /// Indexer to poll for the current target, if there is one.
    pub fn indexer_url(&self) -> Option<&str> {
        let target = self.target.as_ref()?;
        self.configs.get(target.network).indexer_url().ok()
    }

    /// Records an optimistic entry. Returns `false` if the txid is already known.
    pub fn add_pending(&mut self, tx: MintTransaction) -> bool {
        let known = self
            .pending
            .iter()
            .chain(&self.indexed)
            .any(|t| t.bitcoin_tx_id == tx.bitcoin_tx_id);
        if known {
            return false;
        }
        self.pending.push(tx);
        true
    }

    pub fn begin_fetch(&mut self) {
        self.refreshing = true;
    }

    /// Applies the outcome of a fetch. Errors keep the previously fetched entries.
    pub fn apply_fetch(&mut self, result: Result<Vec<IndexerMintTransaction>, IndexerError>) {
        self.refreshing = false;
        let Some(target) = self.target else {
            return;
        };
        self.phase = TrackerPhase::Ready;

        match result {
            Ok(records) => {
                let config = self.configs.get(target.network);
                self.indexed = records
                    .into_iter()
                    .map(|r| r.into_mint_transaction(config))
                    .collect();
                let indexed = &self.indexed;
                self.pending
                    .retain(|p| !indexed.iter().any(|t| t.bitcoin_tx_id == p.bitcoin_tx_id));
                self.last_error = None;
            }
            Err(err) => self.last_error = Some(err.to_string()),
        }
    }

    pub fn view(&self) -> TrackerView {
        TrackerView {
            target: self.target,
            phase: self.phase.clone(),
            transactions: merge_transactions(&self.pending, &self.indexed),
            last_error: self.last_error.clone(),
            refreshing: self.refreshing,
        }
    }
}

#[cfg(test)]
mod tests {
    use byield_primitives::{BitcoinConfig, IndexerMintStatus, MintStatus};

    use super::*;
    use crate::test_utils::{configs_with_indexer, indexer_record, pending, target};

    #[test]
    fn indexer_entry_replaces_optimistic_one() {
        let local = pending("x", 100);
        let mut remote = pending("x", 50);
        remote.status = MintStatus::Confirming;
        remote.indexer_status = Some(IndexerMintStatus::Confirming);

        let merged = merge_transactions(&[local], &[remote.clone()]);
        assert_eq!(merged, vec![remote]);
    }

    #[test]
    fn merged_newest_first() {
        let mut a = pending("a", 10);
        a.operation_start_date = None;
        let b = pending("b", 30);
        let c = pending("c", 20);

        let merged = merge_transactions(&[a, c], &[b]);
        let ids: Vec<_> = merged.iter().map(|t| t.bitcoin_tx_id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn duplicate_indexer_ids_collapse() {
        let merged = merge_transactions(&[], &[pending("a", 2), pending("a", 1)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].timestamp, 2);
    }

    #[test]
    fn unconfigured_network_phase() {
        let mut state = TrackerState::new(NetworkConfigs::default());
        state.set_target(target(BitcoinNetwork::Regtest));

        assert!(matches!(state.phase(), TrackerPhase::Unconfigured(_)));
        assert_eq!(state.indexer_url(), None);
    }

    #[test]
    fn fetch_prunes_pending_and_keeps_data_on_error() {
        let mut state = TrackerState::new(configs_with_indexer("http://indexer"));
        state.set_target(target(BitcoinNetwork::Mainnet));
        assert_eq!(state.phase(), &TrackerPhase::Loading);
        assert_eq!(state.indexer_url(), Some("http://indexer"));

        assert!(state.add_pending(pending("x", 100)));
        assert!(state.add_pending(pending("y", 200)));
        assert!(!state.add_pending(pending("y", 300)));

        state.begin_fetch();
        state.apply_fetch(Ok(vec![indexer_record("x", "confirming", 150)]));
        let view = state.view();
        assert_eq!(view.phase, TrackerPhase::Ready);
        assert_eq!(view.transactions.len(), 2);
        assert!(!view.refreshing);
        let x = view
            .transactions
            .iter()
            .find(|t| t.bitcoin_tx_id == "x")
            .unwrap();
        assert_eq!(x.status, MintStatus::Confirming);
        assert_eq!(
            x.bitcoin_explorer_url,
            BitcoinConfig::defaults(BitcoinNetwork::Mainnet).bitcoin_tx_url("x")
        );

        // indexed txid can no longer be added optimistically
        assert!(!state.add_pending(pending("x", 400)));

        state.apply_fetch(Err(IndexerError::network("timeout")));
        let after_error = state.view();
        assert_eq!(after_error.transactions, view.transactions);
        assert!(after_error
            .last_error
            .as_deref()
            .is_some_and(|e| e.contains("timeout")));

        state.apply_fetch(Ok(vec![indexer_record("x", "minted", 150)]));
        assert_eq!(state.view().last_error, None);
    }

    #[test]
    fn retarget_discards_previous_data() {
        let mut state = TrackerState::new(configs_with_indexer("http://indexer"));
        state.set_target(target(BitcoinNetwork::Mainnet));
        state.add_pending(pending("x", 1));
        state.apply_fetch(Ok(vec![indexer_record("y", "minted", 2)]));

        state.set_target(target(BitcoinNetwork::Testnet));
        let view = state.view();
        assert!(view.transactions.is_empty());
        assert!(matches!(view.phase, TrackerPhase::Unconfigured(_)));
    }

    #[test]
    fn late_result_without_target_is_ignored() {
        let mut state = TrackerState::new(configs_with_indexer("http://indexer"));
        state.apply_fetch(Ok(vec![indexer_record("y", "minted", 2)]));
        assert_eq!(state.view(), TrackerView::default());
    }
}
