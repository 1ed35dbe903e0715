use byield_btc_tx::MintTxError;
use byield_primitives::UnconfiguredNetwork;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BtcApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bitcoin api returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error(transparent)]
    Unconfigured(#[from] UnconfiguredNetwork),
}

impl BtcApiError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

impl From<MintTxError> for BtcApiError {
    fn from(err: MintTxError) -> Self {
        Self::InvalidAddress(err.to_string())
    }
}
