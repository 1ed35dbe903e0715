use bitcoin::{psbt, Network};
use thiserror::Error;

/// Errors raised while building a mint transaction. All of them occur before anything is sent
/// to a wallet.
#[derive(Debug, Error)]
pub enum MintTxError {
    #[error("no UTXOs available")]
    NoUtxosAvailable,

    #[error("insufficient funds: utxo holds {available} sats, {required} sats required")]
    InsufficientFunds { available: u64, required: u64 },

    #[error("OP_RETURN payload of {len} bytes exceeds {max} bytes")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("invalid bitcoin address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("address '{address}' is not valid on {network}")]
    NetworkMismatch { address: String, network: Network },

    #[error("psbt: {0}")]
    Psbt(#[from] psbt::Error),
}
