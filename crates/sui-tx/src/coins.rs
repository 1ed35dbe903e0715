use std::collections::HashSet;

use async_trait::async_trait;
use byield_primitives::SuiAddress;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use tracing::debug;

use crate::{ObjectRef, SuiClientError};

/// A coin object as returned by `suix_getCoins`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub coin_type: String,
    pub coin_object_id: SuiAddress,
    #[serde_as(as = "DisplayFromStr")]
    pub version: u64,
    pub digest: String,
    #[serde_as(as = "DisplayFromStr")]
    pub balance: u64,
}

impl Coin {
    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef {
            object_id: self.coin_object_id,
            version: self.version,
            digest: self.digest.clone(),
        }
    }
}

/// One page of an owner's coins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinPage {
    pub data: Vec<Coin>,
    pub next_cursor: Option<String>,
    pub has_next_page: bool,
}

/// Paginated access to the coins an address owns.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait CoinSource: Send + Sync {
    /// Returns the page of `owner`'s coins of `coin_type` that starts after `cursor`.
    async fn coins_page(
        &self,
        owner: SuiAddress,
        coin_type: String,
        cursor: Option<String>,
    ) -> Result<CoinPage, SuiClientError>;
}

/// Coins gathered towards a requested amount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoinCollection {
    pub coins: Vec<Coin>,
    pub total: u64,
    /// Whether `total` reached the requested amount.
    pub fulfilled: bool,
}

/// Pages through `owner`'s coins of `coin_type` until their balances cover `amount` or the
/// coins run out.
///
/// Running out is reported through [`CoinCollection::fulfilled`], not as an error. Pages are
/// fetched one after another and a failed fetch aborts the collection. A coin served twice is
/// counted once.
pub async fn collect_coins_for_amount(
    source: &impl CoinSource,
    owner: SuiAddress,
    coin_type: &str,
    amount: u64,
) -> Result<CoinCollection, SuiClientError> {
    let mut collection = CoinCollection::default();
    if amount == 0 {
        collection.fulfilled = true;
        return Ok(collection);
    }

    let mut seen_coins = HashSet::new();
    let mut seen_cursors = HashSet::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = source
            .coins_page(owner, coin_type.to_owned(), cursor.clone())
            .await?;
        let page_empty = page.data.is_empty();

        for coin in page.data {
            if collection.total >= amount {
                break;
            }
            if coin.balance == 0 || !seen_coins.insert(coin.coin_object_id) {
                continue;
            }
            collection.total = collection.total.saturating_add(coin.balance);
            collection.coins.push(coin);
        }

        if collection.total >= amount {
            collection.fulfilled = true;
            break;
        }

        // a cursor served before would loop forever
        match page.next_cursor {
            Some(next)
                if page.has_next_page && !page_empty && seen_cursors.insert(next.clone()) =>
            {
                cursor = Some(next);
            }
            _ => break,
        }
    }

    debug!(
        %owner,
        %coin_type,
        amount,
        total = collection.total,
        coins = collection.coins.len(),
        fulfilled = collection.fulfilled,
        "collected coins"
    );
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::test_utils::{coin, StaticCoinSource, NBTC_TYPE};

    fn owner() -> SuiAddress {
        "0xbeef".parse().unwrap()
    }

    #[tokio::test]
    async fn stops_once_amount_is_covered() {
        let source = StaticCoinSource::new(vec![coin(1, 700), coin(2, 300), coin(3, 100)], 10);
        let collection = collect_coins_for_amount(&source, owner(), NBTC_TYPE, 900)
            .await
            .unwrap();

        let balances: Vec<u64> = collection.coins.iter().map(|c| c.balance).collect();
        assert_eq!(balances, vec![700, 300]);
        assert_eq!(collection.total, 1_000);
        assert!(collection.fulfilled);
    }

    #[tokio::test]
    async fn pages_until_fulfilled() {
        let source = StaticCoinSource::new((1..=6).map(|i| coin(i, 100)).collect(), 2);
        let collection = collect_coins_for_amount(&source, owner(), NBTC_TYPE, 450)
            .await
            .unwrap();

        assert_eq!(collection.coins.len(), 5);
        assert!(collection.fulfilled);
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn insufficient_balance_is_not_an_error() {
        let source = StaticCoinSource::new(vec![coin(1, 10), coin(2, 20)], 1);
        let collection = collect_coins_for_amount(&source, owner(), NBTC_TYPE, 1_000)
            .await
            .unwrap();

        assert!(!collection.fulfilled);
        assert_eq!(collection.total, 30);
        assert_eq!(collection.coins.len(), 2);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn zero_amount_fetches_nothing() {
        let mut source = MockCoinSource::new();
        source.expect_coins_page().times(0);

        let collection = collect_coins_for_amount(&source, owner(), NBTC_TYPE, 0)
            .await
            .unwrap();
        assert!(collection.fulfilled);
        assert!(collection.coins.is_empty());
    }

    #[tokio::test]
    async fn stuck_cursor_terminates() {
        let mut source = MockCoinSource::new();
        source
            .expect_coins_page()
            .with(eq(owner()), eq(NBTC_TYPE.to_owned()), mockall::predicate::always())
            .times(2)
            .returning(|_, _, _| {
                Ok(CoinPage {
                    data: vec![coin(1, 1)],
                    next_cursor: Some("same".to_owned()),
                    has_next_page: true,
                })
            });

        let collection = collect_coins_for_amount(&source, owner(), NBTC_TYPE, 10)
            .await
            .unwrap();
        assert!(!collection.fulfilled);
    }

    #[tokio::test]
    async fn cycling_cursor_counts_each_coin_once() {
        let mut source = MockCoinSource::new();
        source
            .expect_coins_page()
            .times(3)
            .returning(|_, _, cursor| {
                let (data, next) = match cursor.as_deref() {
                    None => (vec![coin(1, 10)], "a"),
                    Some("a") => (vec![coin(2, 20)], "b"),
                    _ => (vec![coin(1, 10), coin(2, 20)], "a"),
                };
                Ok(CoinPage {
                    data,
                    next_cursor: Some(next.to_owned()),
                    has_next_page: true,
                })
            });

        let collection = collect_coins_for_amount(&source, owner(), NBTC_TYPE, 1_000)
            .await
            .unwrap();
        let ids: Vec<_> = collection.coins.iter().map(|c| c.coin_object_id).collect();
        assert_eq!(ids, vec![coin(1, 10).coin_object_id, coin(2, 20).coin_object_id]);
        assert_eq!(collection.total, 30);
        assert!(!collection.fulfilled);
    }

    #[tokio::test]
    async fn fetch_error_propagates() {
        let mut source = MockCoinSource::new();
        source
            .expect_coins_page()
            .times(1)
            .returning(|_, _, _| Err(SuiClientError::network("connection refused")));

        let result = collect_coins_for_amount(&source, owner(), NBTC_TYPE, 10).await;
        assert_eq!(
            result,
            Err(SuiClientError::Network("connection refused".to_owned()))
        );
    }

    #[test]
    fn coin_decodes_rpc_json() {
        let json = r#"{
            "coinType": "0x2::sui::SUI",
            "coinObjectId": "0x1234",
            "version": "42",
            "digest": "HJc9",
            "balance": "1000000000",
            "previousTransaction": "9xyz"
        }"#;
        let coin: Coin = serde_json::from_str(json).unwrap();
        assert_eq!(coin.balance, 1_000_000_000);
        assert_eq!(coin.version, 42);
        assert_eq!(coin.object_ref().object_id, "0x1234".parse().unwrap());
    }
}
