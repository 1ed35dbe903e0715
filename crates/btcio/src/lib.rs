//! Input-output with Bitcoin through a mempool.space/esplora compatible HTTP API, plus the
//! recurring job that keeps recommended fee rates fresh.

mod client;
mod error;
mod fees;
mod types;

#[cfg(any(test, feature = "test-utils"))]
pub use client::MockBitcoinApi;
pub use client::{BitcoinApi, MempoolClient};
pub use error::BtcApiError;
pub use fees::{fee_job, DEFAULT_FEE_REFRESH_INTERVAL};
pub use types::{AddressValidation, EsploraUtxo, RecommendedFees, TxStatus};
