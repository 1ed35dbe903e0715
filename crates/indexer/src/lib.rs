//! Client for the nBTC indexer, the service that follows both chains and reports where each
//! mint stands.

mod client;
mod error;
mod types;

#[cfg(any(test, feature = "test-utils"))]
pub use client::MockIndexerClient;
pub use client::{HttpIndexerClient, IndexerClient, DEFAULT_REQUEST_TIMEOUT};
pub use error::IndexerError;
pub use types::{decode_mint_transaction, decode_mint_transactions, IndexerMintTransaction};
