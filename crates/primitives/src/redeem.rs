//! nBTC redemptions back to Bitcoin.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Redeem lifecycle. Variants are declared in order and every state implies all earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedeemStatus {
    Pending,
    Proposed,
    Signed,
    Broadcasted,
    Solved,
}

impl RedeemStatus {
    /// The only state this one may move to, if any.
    pub fn next(&self) -> Option<RedeemStatus> {
        match self {
            RedeemStatus::Pending => Some(RedeemStatus::Proposed),
            RedeemStatus::Proposed => Some(RedeemStatus::Signed),
            RedeemStatus::Signed => Some(RedeemStatus::Broadcasted),
            RedeemStatus::Broadcasted => Some(RedeemStatus::Solved),
            RedeemStatus::Solved => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedeemTransitionError {
    #[error("redeem cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        from: RedeemStatus,
        to: RedeemStatus,
    },

    #[error("redeem reached {0:?} without a bitcoin transaction id")]
    MissingBitcoinTxId(RedeemStatus),
}

/// A burn of nBTC on Sui that releases BTC to `bitcoin_address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedeemTransaction {
    pub sui_tx_id: String,
    pub amount_sats: u64,
    pub bitcoin_address: String,
    pub status: RedeemStatus,
    pub bitcoin_tx_id: Option<String>,
}

impl RedeemTransaction {
    pub fn new(
        sui_tx_id: impl Into<String>,
        amount_sats: u64,
        bitcoin_address: impl Into<String>,
    ) -> Self {
        Self {
            sui_tx_id: sui_tx_id.into(),
            amount_sats,
            bitcoin_address: bitcoin_address.into(),
            status: RedeemStatus::Pending,
            bitcoin_tx_id: None,
        }
    }

    /// Moves to `to`, which must be the immediate successor of the current state.
    ///
    /// `bitcoin_tx_id` is recorded when given and is required from `Broadcasted` on.
    pub fn advance(
        &mut self,
        to: RedeemStatus,
        bitcoin_tx_id: Option<String>,
    ) -> Result<(), RedeemTransitionError> {
        if self.status.next() != Some(to) {
            return Err(RedeemTransitionError::InvalidTransition {
                from: self.status,
                to,
            });
        }

        let txid = bitcoin_tx_id.or_else(|| self.bitcoin_tx_id.clone());
        if to >= RedeemStatus::Broadcasted && txid.is_none() {
            return Err(RedeemTransitionError::MissingBitcoinTxId(to));
        }

        self.bitcoin_tx_id = txid;
        self.status = to;
        Ok(())
    }
}
