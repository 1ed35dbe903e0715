use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::{decode_mint_transaction, decode_mint_transactions, IndexerError, IndexerMintTransaction};

/// Upper bound on a single indexer request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Read access to the nBTC indexer.
///
/// The base URL is passed per call because it depends on the selected network.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait IndexerClient: Send + Sync {
    /// Mints whose recipient is `sui_recipient`.
    async fn mint_transactions(
        &self,
        indexer_url: &str,
        sui_recipient: &str,
    ) -> Result<Vec<IndexerMintTransaction>, IndexerError>;

    /// A single mint by Bitcoin txid, `None` if the indexer does not know it.
    async fn mint_transaction(
        &self,
        indexer_url: &str,
        bitcoin_tx_id: &str,
    ) -> Result<Option<IndexerMintTransaction>, IndexerError>;
}

/// [`IndexerClient`] over the indexer's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpIndexerClient {
    client: Client,
}

impl HttpIndexerClient {
    pub fn new(timeout: Duration) -> Result<Self, IndexerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IndexerError::network(e.to_string()))?;
        Ok(Self { client })
    }

    async fn get(&self, url: String, query: &[(&str, &str)]) -> Result<reqwest::Response, IndexerError> {
        debug!(%url, "indexer request");
        self.client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| IndexerError::network(e.to_string()))
    }
}

async fn success_body(response: reqwest::Response) -> Result<Vec<u8>, IndexerError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(IndexerError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let body = response
        .bytes()
        .await
        .map_err(|e| IndexerError::network(e.to_string()))?;
    Ok(body.to_vec())
}

#[async_trait]
impl IndexerClient for HttpIndexerClient {
    async fn mint_transactions(
        &self,
        indexer_url: &str,
        sui_recipient: &str,
    ) -> Result<Vec<IndexerMintTransaction>, IndexerError> {
        let url = format!("{}/nbtc", indexer_url.trim_end_matches('/'));
        let response = self.get(url, &[("sui_recipient", sui_recipient)]).await?;
        decode_mint_transactions(&success_body(response).await?)
    }

    async fn mint_transaction(
        &self,
        indexer_url: &str,
        bitcoin_tx_id: &str,
    ) -> Result<Option<IndexerMintTransaction>, IndexerError> {
        let url = format!("{}/nbtc/{bitcoin_tx_id}", indexer_url.trim_end_matches('/'));
        let response = self.get(url, &[]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode_mint_transaction(&success_body(response).await?).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use byield_common::test_utils::{HttpStub, StubResponse};

    use super::*;

    const RECORD: &str = r#"{"bitcoin_tx_id":"ab01","amount_satoshi":1000,"status":"confirming",
        "sui_recipient":"0x1","timestamp":1,"confirmations":2}"#;

    fn client() -> HttpIndexerClient {
        HttpIndexerClient::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn lists_mints_for_recipient() {
        let stub = HttpStub::start(vec![(
            "/nbtc",
            StubResponse::ok(format!(r#"{{"transactions":[{RECORD}]}}"#)),
        )])
        .await
        .unwrap();

        let txs = client().mint_transactions(stub.url(), "0xabc").await.unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].bitcoin_tx_id, "ab01");
        assert_eq!(stub.requests(), vec!["/nbtc?sui_recipient=0xabc".to_owned()]);
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url() {
        let stub = HttpStub::start(vec![("/nbtc", StubResponse::ok("[]"))])
            .await
            .unwrap();
        let url = format!("{}/", stub.url());
        assert!(client().mint_transactions(&url, "0x1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_error() {
        let stub = HttpStub::start(vec![("/nbtc", StubResponse::status(503, "down"))])
            .await
            .unwrap();

        let err = client().mint_transactions(stub.url(), "0x1").await.unwrap_err();
        assert_eq!(
            err,
            IndexerError::Status {
                status: 503,
                body: "down".to_owned()
            }
        );
    }

    #[tokio::test]
    async fn single_mint_lookup() {
        let stub = HttpStub::start(vec![("/nbtc/ab01", StubResponse::ok(RECORD))])
            .await
            .unwrap();

        let found = client().mint_transaction(stub.url(), "ab01").await.unwrap();
        assert_eq!(found.map(|t| t.confirmations), Some(2));

        // the stub answers 404 for unknown paths
        let missing = client().mint_transaction(stub.url(), "ffff").await.unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn unreachable_indexer_is_network_error() {
        // nothing listens on port 9 of the loopback interface
        let err = client()
            .mint_transactions("http://127.0.0.1:9", "0x1")
            .await
            .unwrap_err();
        assert!(matches!(err, IndexerError::Network(_)));
    }

    #[tokio::test]
    async fn mock_client_expectations() {
        let mut mock = MockIndexerClient::new();
        mock.expect_mint_transaction()
            .withf(|url, txid| url == "http://indexer" && txid == "ab01")
            .times(1)
            .returning(|_, _| Ok(None));

        assert_eq!(
            mock.mint_transaction("http://indexer", "ab01").await,
            Ok(None)
        );
    }
}
