use std::time::Duration;

use async_trait::async_trait;
use bitcoin::Txid;
use byield_btc_tx::{parse_address, Utxo};
use byield_primitives::{BitcoinConfig, BitcoinNetwork};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{AddressValidation, BtcApiError, EsploraUtxo, RecommendedFees, TxStatus};

/// Read-only access to a Bitcoin indexing API.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait BitcoinApi: Send + Sync {
    /// Unspent outputs of `address`, with their script filled in.
    async fn address_utxos(&self, address: &str) -> Result<Vec<Utxo>, BtcApiError>;

    async fn validate_address(&self, address: &str) -> Result<AddressValidation, BtcApiError>;

    async fn recommended_fees(&self) -> Result<RecommendedFees, BtcApiError>;

    async fn tx_status(&self, txid: Txid) -> Result<TxStatus, BtcApiError>;

    async fn tip_height(&self) -> Result<u64, BtcApiError>;
}

/// [`BitcoinApi`] for mempool.space and other esplora compatible servers.
#[derive(Debug, Clone)]
pub struct MempoolClient {
    client: Client,
    base_url: String,
    network: BitcoinNetwork,
}

impl MempoolClient {
    pub fn new(
        base_url: &str,
        network: BitcoinNetwork,
        timeout: Duration,
    ) -> Result<Self, BtcApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BtcApiError::network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            network,
        })
    }

    /// Client for the mempool API configured for `config.network`.
    pub fn from_config(config: &BitcoinConfig, timeout: Duration) -> Result<Self, BtcApiError> {
        Self::new(config.mempool_url()?, config.network, timeout)
    }

    pub fn network(&self) -> BitcoinNetwork {
        self.network
    }

    async fn get(&self, path: &str) -> Result<Response, BtcApiError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "bitcoin api request");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BtcApiError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BtcApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BtcApiError> {
        self.get(path)
            .await?
            .json()
            .await
            .map_err(|e| BtcApiError::decode(e.to_string()))
    }
}

#[async_trait]
impl BitcoinApi for MempoolClient {
    async fn address_utxos(&self, address: &str) -> Result<Vec<Utxo>, BtcApiError> {
        let parsed = parse_address(address, self.network)?;
        let script_pubkey = parsed.script_pubkey();

        let utxos: Vec<EsploraUtxo> = self.get_json(&format!("/address/{parsed}/utxo")).await?;
        debug!(%address, count = utxos.len(), "fetched utxos");
        Ok(utxos
            .into_iter()
            .map(|u| u.into_utxo(script_pubkey.clone()))
            .collect())
    }

    async fn validate_address(&self, address: &str) -> Result<AddressValidation, BtcApiError> {
        self.get_json(&format!("/v1/validate-address/{}", address.trim()))
            .await
    }

    async fn recommended_fees(&self) -> Result<RecommendedFees, BtcApiError> {
        self.get_json("/v1/fees/recommended").await
    }

    async fn tx_status(&self, txid: Txid) -> Result<TxStatus, BtcApiError> {
        self.get_json(&format!("/tx/{txid}/status")).await
    }

    async fn tip_height(&self) -> Result<u64, BtcApiError> {
        let text = self
            .get("/blocks/tip/height")
            .await?
            .text()
            .await
            .map_err(|e| BtcApiError::network(e.to_string()))?;
        text.trim()
            .parse()
            .map_err(|_| BtcApiError::decode(format!("invalid tip height '{}'", text.trim())))
    }
}

#[cfg(test)]
mod tests {
    use bitcoin::Amount;
    use byield_common::test_utils::{HttpStub, StubResponse};

    use super::*;

    const ADDRESS: &str = "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4";
    const TXID: &str = "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";

    fn client(stub: &HttpStub) -> MempoolClient {
        MempoolClient::new(stub.url(), BitcoinNetwork::Mainnet, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn utxos_carry_address_script() {
        let body = format!(
            r#"[{{"txid":"{TXID}","vout":0,"status":{{"confirmed":false}},"value":100000}}]"#
        );
        let stub = HttpStub::start(vec![(
            "/address/bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4/utxo",
            StubResponse::ok(body),
        )])
        .await
        .unwrap();

        let utxos = client(&stub).address_utxos(ADDRESS).await.unwrap();
        assert_eq!(utxos.len(), 1);
        assert_eq!(utxos[0].value, Amount::from_sat(100_000));
        assert_eq!(
            utxos[0].script_pubkey.to_hex_string(),
            "0014751e76e8199196d454941c45d1b3a323f1433bd6"
        );
    }

    #[tokio::test]
    async fn utxos_for_wrong_network_fail_before_request() {
        let stub = HttpStub::start(vec![]).await.unwrap();
        let err = client(&stub)
            .address_utxos("tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx")
            .await
            .unwrap_err();

        assert!(matches!(err, BtcApiError::InvalidAddress(_)));
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn tip_height_is_plain_text() {
        let stub = HttpStub::start(vec![("/blocks/tip/height", StubResponse::ok("840000\n"))])
            .await
            .unwrap();
        assert_eq!(client(&stub).tip_height().await.unwrap(), 840_000);
    }

    #[tokio::test]
    async fn garbage_tip_height_is_decode_error() {
        let stub = HttpStub::start(vec![("/blocks/tip/height", StubResponse::ok("soon"))])
            .await
            .unwrap();
        assert!(matches!(
            client(&stub).tip_height().await,
            Err(BtcApiError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn tx_status_and_fees() {
        let stub = HttpStub::start(vec![
            (
                "/tx/4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b/status",
                StubResponse::ok(r#"{"confirmed":true,"block_height":10}"#),
            ),
            (
                "/v1/fees/recommended",
                StubResponse::ok(
                    r#"{"fastestFee":5,"halfHourFee":4,"hourFee":3,"economyFee":2,"minimumFee":1}"#,
                ),
            ),
        ])
        .await
        .unwrap();
        let client = client(&stub);

        let status = client.tx_status(TXID.parse().unwrap()).await.unwrap();
        assert_eq!(status.confirmations(12), 3);

        let fees = client.recommended_fees().await.unwrap();
        assert_eq!(fees.half_hour_fee, 4);
    }

    #[tokio::test]
    async fn validate_address_reports_server_verdict() {
        let stub = HttpStub::start(vec![(
            "/v1/validate-address/bc1qnope",
            StubResponse::ok(r#"{"isvalid":false,"error":"Invalid checksum"}"#),
        )])
        .await
        .unwrap();

        let v = client(&stub).validate_address("bc1qnope").await.unwrap();
        assert!(!v.is_valid);
    }

    #[tokio::test]
    async fn error_status_keeps_body() {
        let stub = HttpStub::start(vec![("/v1/fees/recommended", StubResponse::status(429, "slow down"))])
            .await
            .unwrap();
        assert_eq!(
            client(&stub).recommended_fees().await.unwrap_err(),
            BtcApiError::Status {
                status: 429,
                body: "slow down".to_owned()
            }
        );
    }

    #[test]
    fn unconfigured_mempool_url() {
        let config = BitcoinConfig::defaults(BitcoinNetwork::Regtest);
        assert!(matches!(
            MempoolClient::from_config(&config, Duration::from_secs(1)),
            Err(BtcApiError::Unconfigured(_))
        ));
    }
}
