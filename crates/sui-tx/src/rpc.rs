use async_trait::async_trait;
use byield_primitives::SuiAddress;
use jsonrpsee::{
    core::{ClientError, RpcResult},
    http_client::{HttpClient, HttpClientBuilder},
    proc_macros::rpc,
};

use crate::{CoinPage, CoinSource, SuiClientError};

/// Sui full node coin queries.
#[rpc(client, namespace = "suix")]
pub trait SuiCoinRpc {
    /// Coins of `coin_type` owned by `owner`, starting after `cursor`.
    #[method(name = "getCoins")]
    async fn get_coins(
        &self,
        owner: SuiAddress,
        coin_type: Option<String>,
        cursor: Option<String>,
        limit: Option<usize>,
    ) -> RpcResult<CoinPage>;
}

/// [`CoinSource`] backed by a Sui full node's JSON-RPC API. Pages have the node's default size.
#[derive(Debug)]
pub struct SuiRpcCoinSource {
    client: HttpClient,
}

impl SuiRpcCoinSource {
    pub fn try_new(rpc_url: &str) -> Result<Self, SuiClientError> {
        let client = HttpClientBuilder::default()
            .build(rpc_url)
            .map_err(|e| SuiClientError::rpc(e.to_string()))?;
        Ok(Self { client })
    }
}

fn map_client_error(err: ClientError) -> SuiClientError {
    match err {
        ClientError::Call(call) => SuiClientError::rpc(call.message()),
        ClientError::Transport(e) => SuiClientError::network(e.to_string()),
        ClientError::RequestTimeout => SuiClientError::network("request timed out"),
        other => SuiClientError::rpc(other.to_string()),
    }
}

#[async_trait]
impl CoinSource for SuiRpcCoinSource {
    async fn coins_page(
        &self,
        owner: SuiAddress,
        coin_type: String,
        cursor: Option<String>,
    ) -> Result<CoinPage, SuiClientError> {
        self.client
            .get_coins(owner, Some(coin_type), cursor, None)
            .await
            .map_err(map_client_error)
    }
}
