//! Construction of the Bitcoin side of nBTC mints.
//!
//! Everything here is pure: templates are built from already fetched UTXOs and handed to an
//! external wallet for signing and broadcast.

mod address;
mod error;
mod fee;
mod mint;
mod utxo;

pub use address::{parse_address, to_bitcoin_network};
pub use error::MintTxError;
pub use fee::{estimate_mint_fee, estimate_mint_vsize};
pub use mint::{
    build_mint_transaction, nbtc_mint_payload, op_return_script, MintTxTemplate,
    MAX_OP_RETURN_PAYLOAD, NBTC_PAYLOAD_VERSION,
};
pub use utxo::Utxo;
