//! Helpers for testing code that reads coins.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use byield_primitives::SuiAddress;

use crate::{Coin, CoinPage, CoinSource, SuiClientError};

/// Coin type used by the helpers below.
pub const NBTC_TYPE: &str = "0x00000000000000000000000000000000000000000000000000000000000000aa::nbtc::NBTC";

/// Creates an nBTC coin whose object id is derived from `id`.
pub fn coin(id: u8, balance: u64) -> Coin {
    let mut object_id = [0u8; 32];
    object_id[31] = id;
    Coin {
        coin_type: NBTC_TYPE.to_owned(),
        coin_object_id: SuiAddress::new(object_id),
        version: u64::from(id),
        digest: format!("digest{id}"),
        balance,
    }
}

/// [`CoinSource`] serving a fixed list of coins in pages of `page_size`.
///
/// Cursors are the index of the next coin. Counts every call.
#[derive(Debug)]
pub struct StaticCoinSource {
    coins: Vec<Coin>,
    page_size: usize,
    calls: AtomicUsize,
}

impl StaticCoinSource {
    pub fn new(coins: Vec<Coin>, page_size: usize) -> Self {
        Self {
            coins,
            page_size: page_size.max(1),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CoinSource for StaticCoinSource {
    async fn coins_page(
        &self,
        _owner: SuiAddress,
        coin_type: String,
        cursor: Option<String>,
    ) -> Result<CoinPage, SuiClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let start = match cursor {
            Some(c) => c
                .parse::<usize>()
                .map_err(|e| SuiClientError::rpc(format!("bad cursor: {e}")))?,
            None => 0,
        };
        let matching: Vec<&Coin> = self
            .coins
            .iter()
            .filter(|c| c.coin_type == coin_type)
            .collect();
        let end = (start + self.page_size).min(matching.len());
        let data = matching
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|c| (*c).clone())
            .collect();
        let has_next_page = end < matching.len();

        Ok(CoinPage {
            data,
            next_cursor: has_next_page.then(|| end.to_string()),
            has_next_page,
        })
    }
}
